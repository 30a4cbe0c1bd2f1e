//! Renderable geometry for the graphical method.
//!
//! Every constraint becomes a segment between its axis intercepts (or a
//! horizontal/vertical run out to the display scale), followed by the two
//! non-negativity axes.

use crate::config::SolverConfig;
use crate::problem::{Constraint, Point};

const AXIS_COLOR: &str = "rgba(0, 0, 0, 0.4)";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub data: [PlotPoint; 2],
    pub color: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub lines: Vec<Segment>,
    pub region_vertices: Vec<(f64, f64)>,
    pub max_scale: f64,
}

/// Spread hues by the golden angle so neighbouring constraints stay distinct
pub fn line_color(index: usize) -> String {
    format!("hsl({}, 70%, 50%)", (index * 137) % 360)
}

pub fn segment(constraint: &Constraint, max_scale: f64, epsilon: f64) -> [PlotPoint; 2] {
    let (c1, c2, b) = (constraint.expr.c1, constraint.expr.c2, constraint.rhs);
    let x_intercept = if c1.abs() > epsilon { b / c1 } else { 0.0 };
    let y_intercept = if c2.abs() > epsilon { b / c2 } else { 0.0 };

    if c1.abs() < epsilon {
        [PlotPoint::new(0.0, y_intercept), PlotPoint::new(max_scale, y_intercept)]
    } else if c2.abs() < epsilon {
        [PlotPoint::new(x_intercept, 0.0), PlotPoint::new(x_intercept, max_scale)]
    } else {
        [PlotPoint::new(0.0, y_intercept), PlotPoint::new(x_intercept, 0.0)]
    }
}

pub fn build_chart(
    constraints: &[Constraint],
    region: &[Point],
    max_scale: f64,
    config: &SolverConfig,
) -> ChartData {
    let mut lines: Vec<Segment> = constraints
        .iter()
        .enumerate()
        .map(|(i, c)| Segment {
            label: c.label.clone(),
            data: segment(c, max_scale, config.intercept_epsilon),
            color: line_color(i),
        })
        .collect();

    let origin = PlotPoint::new(0.0, 0.0);
    lines.push(Segment {
        label: "x1 >= 0".to_string(),
        data: [origin, PlotPoint::new(max_scale, 0.0)],
        color: AXIS_COLOR.to_string(),
    });
    lines.push(Segment {
        label: "x2 >= 0".to_string(),
        data: [origin, PlotPoint::new(0.0, max_scale)],
        color: AXIS_COLOR.to_string(),
    });

    ChartData {
        lines,
        region_vertices: region.iter().map(|p| (p.x1, p.x2)).collect(),
        max_scale,
    }
}
