use std::collections::HashSet;

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::problem::{BoundaryLine, Point};

/// Candidate vertices plus the display scale grown while collecting them
#[derive(Debug, Clone, PartialEq)]
pub struct Intersections {
    /// Rounded, de-duplicated, in pair enumeration order
    pub points: Vec<Point>,
    pub max_scale: f64,
}

/// Solve the 2x2 system formed by two boundary lines.
///
/// Returns `None` for parallel or coincident lines.
pub fn intersect(a: &BoundaryLine, b: &BoundaryLine, singular_epsilon: f64) -> Option<Point> {
    let (a1, a2) = (a.expr.c1, a.expr.c2);
    let (b1, b2) = (b.expr.c1, b.expr.c2);
    let det = a1 * b2 - a2 * b1;
    let magnitude = (a1 * b2).abs() + (a2 * b1).abs();
    if det.abs() <= singular_epsilon * magnitude {
        return None;
    }
    // Cramer's rule
    let x1 = (a.rhs * b2 - a2 * b.rhs) / det;
    let x2 = (a1 * b.rhs - a.rhs * b1) / det;
    Some(Point::new(x1, x2))
}

/// Intersect every unordered pair of lines.
pub fn enumerate(lines: &[BoundaryLine], config: &SolverConfig) -> Result<Intersections, SolveError> {
    let mut seen = HashSet::new();
    let mut points = Vec::new();
    let mut max_scale = config.scale_floor;
    let mut singular = 0usize;

    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            let Some(raw) = intersect(&lines[i], &lines[j], config.singular_epsilon) else {
                singular += 1;
                tracing::trace!(a = %lines[i].label, b = %lines[j].label, "parallel lines skipped");
                continue;
            };
            if !raw.is_finite() {
                return Err(SolveError::UnexpectedComputation(format!(
                    "intersection of '{}' and '{}' is not finite",
                    lines[i].label, lines[j].label
                )));
            }
            let point = raw.rounded(config.precision);
            tracing::trace!(a = %lines[i].label, b = %lines[j].label, x1 = point.x1, x2 = point.x2, "intersection");

            if point.x1 >= 0.0 && point.x2 >= 0.0 {
                max_scale = max_scale
                    .max(point.x1 * config.scale_factor)
                    .max(point.x2 * config.scale_factor);
            }
            if seen.insert(point.key()) {
                points.push(point);
            }
        }
    }

    tracing::debug!(
        lines = lines.len(),
        points = points.len(),
        singular,
        max_scale,
        "line intersection complete"
    );

    Ok(Intersections { points, max_scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::LinearExpr;

    fn line(c1: f64, c2: f64, rhs: f64) -> BoundaryLine {
        BoundaryLine {
            label: format!("{c1}x1+{c2}x2={rhs}"),
            expr: LinearExpr::new(c1, c2),
            rhs,
        }
    }

    #[test]
    fn test_intersect_crossing_lines() {
        let p = intersect(&line(6.0, 4.0, 24.0), &line(1.0, 2.0, 6.0), 1e-12).unwrap();
        assert!((p.x1 - 3.0).abs() < 1e-9);
        assert!((p.x2 - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_and_coincident_skipped() {
        assert!(intersect(&line(1.0, 1.0, 4.0), &line(2.0, 2.0, 10.0), 1e-12).is_none());
        assert!(intersect(&line(1.0, 1.0, 4.0), &line(2.0, 2.0, 8.0), 1e-12).is_none());
    }

    #[test]
    fn test_small_coefficients_still_cross() {
        let p = intersect(&line(1e-6, 0.0, 1.0), &line(0.0, 1e-6, 1.0), 1e-12).unwrap();
        assert!((p.x1 - 1e6).abs() < 1e-3);
        assert!((p.x2 - 1e6).abs() < 1e-3);
    }

    #[test]
    fn test_overflowing_intersection_is_an_error() {
        let lines = vec![line(1e-10, 0.0, 1e308), line(0.0, 1.0, 0.0)];
        let result = enumerate(&lines, &SolverConfig::default());
        assert!(matches!(result, Err(SolveError::UnexpectedComputation(_))));
    }

    #[test]
    fn test_enumerate_dedups_shared_vertex() {
        // Three lines through (2, 2) plus the axes
        let mut lines = vec![line(1.0, 0.0, 2.0), line(0.0, 1.0, 2.0), line(1.0, 1.0, 4.0)];
        lines.extend(BoundaryLine::axes());
        let result = enumerate(&lines, &SolverConfig::default()).unwrap();
        let at_22 = result
            .points
            .iter()
            .filter(|p| p.x1 == 2.0 && p.x2 == 2.0)
            .count();
        assert_eq!(at_22, 1);
        assert_eq!(result.max_scale, 50.0);
    }

    #[test]
    fn test_scale_grows_with_large_points() {
        let mut lines = vec![line(1.0, 1.0, 100.0)];
        lines.extend(BoundaryLine::axes());
        let result = enumerate(&lines, &SolverConfig::default()).unwrap();
        assert!((result.max_scale - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_points_do_not_grow_scale() {
        let mut lines = vec![line(1.0, -1.0, 200.0)];
        lines.extend(BoundaryLine::axes());
        // (200, 0) grows the scale, (0, -200) does not
        let result = enumerate(&lines, &SolverConfig::default()).unwrap();
        assert!((result.max_scale - 240.0).abs() < 1e-9);
        assert!(result.points.contains(&Point::new(0.0, -200.0)));
    }
}
