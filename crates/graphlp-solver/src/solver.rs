use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::feasibility::is_feasible;
use crate::intersect;
use crate::plot::build_chart;
use crate::problem::{Direction, LinearExpr, LpProblem, Point};
use crate::solution::{Solution, Vertex};

/// Graphical-method solver for two-variable linear programs
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.config.tolerance = tol;
        self
    }

    pub fn with_precision(mut self, decimals: u32) -> Self {
        self.config.precision = decimals;
        self
    }

    pub fn with_scale_floor(mut self, floor: f64) -> Self {
        self.config.scale_floor = floor;
        self
    }

    /// Enumerate boundary intersections, keep the feasible ones and pick the optimum
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, SolveError> {
        if problem.constraints.is_empty() {
            return Err(SolveError::NoStructuralConstraints);
        }

        let lines = problem.boundary_lines();
        let candidates = intersect::enumerate(&lines, &self.config)?;

        let checks = problem.feasibility_set();
        let feasible: Vec<Point> = candidates
            .points
            .iter()
            .copied()
            .filter(|p| is_feasible(*p, &checks, self.config.tolerance))
            .collect();

        tracing::debug!(
            candidates = candidates.points.len(),
            feasible = feasible.len(),
            direction = %problem.objective.direction,
            "feasibility filter complete"
        );

        let (vertices, optimal_point, optimal_value) =
            self.select_optimum(&feasible, problem.objective.expr, problem.objective.direction)?;

        let binding_constraints = problem
            .constraints
            .iter()
            .filter(|c| c.is_binding_at(optimal_point, self.config.tolerance))
            .map(|c| c.label.clone())
            .collect();

        let chart = build_chart(&problem.constraints, &feasible, candidates.max_scale, &self.config);

        tracing::debug!(
            x1 = optimal_point.x1,
            x2 = optimal_point.x2,
            z = optimal_value,
            "optimum selected"
        );

        Ok(Solution {
            optimal_point,
            optimal_value,
            vertices,
            binding_constraints,
            chart,
        })
    }

    /// Evaluate the objective at every feasible point and mark the optimum.
    ///
    /// A later vertex only displaces the running best when it improves on it
    /// by more than the tolerance, so the earliest of several tied vertices is
    /// reported as `optimal_point`. Every vertex within tolerance of the
    /// optimum is flagged.
    pub fn select_optimum(
        &self,
        feasible: &[Point],
        objective: LinearExpr,
        direction: Direction,
    ) -> Result<(Vec<Vertex>, Point, f64), SolveError> {
        let tol = self.config.tolerance;
        let mut best: Option<(Point, f64)> = None;
        let mut vertices = Vec::with_capacity(feasible.len());

        for (i, &point) in feasible.iter().enumerate() {
            let z = objective.eval(point);
            if !z.is_finite() {
                return Err(SolveError::UnexpectedComputation(format!(
                    "objective is not finite at ({}, {})",
                    point.x1, point.x2
                )));
            }
            best = match best {
                None => Some((point, z)),
                Some((_, current)) if improves(direction, z, current, tol) => Some((point, z)),
                keep => keep,
            };
            vertices.push(Vertex {
                label: format!("V{}", i + 1),
                x1: point.x1,
                x2: point.x2,
                z,
                is_optimal: false,
            });
        }

        let Some((optimal_point, optimal_value)) = best else {
            return Err(SolveError::InfeasibleOrUnbounded);
        };

        for vertex in &mut vertices {
            vertex.is_optimal = (vertex.z - optimal_value).abs() < tol;
        }

        Ok((vertices, optimal_point, optimal_value))
    }
}

fn improves(direction: Direction, z: f64, best: f64, tol: f64) -> bool {
    match direction {
        Direction::Max => z > best + tol,
        Direction::Min => z < best - tol,
    }
}
