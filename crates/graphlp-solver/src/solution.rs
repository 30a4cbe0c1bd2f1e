use crate::plot::ChartData;
use crate::problem::Point;

/// A feasible intersection point with its objective value
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// `V1`, `V2`, ... in discovery order
    pub label: String,
    pub x1: f64,
    pub x2: f64,
    /// Objective value at this vertex
    pub z: f64,
    pub is_optimal: bool,
}

impl Vertex {
    pub fn point(&self) -> Point {
        Point::new(self.x1, self.x2)
    }
}

/// The result of solving a two-variable LP
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub optimal_point: Point,
    pub optimal_value: f64,
    /// Every feasible vertex; more than one may be marked optimal
    pub vertices: Vec<Vertex>,
    /// Labels of structural constraints tight at the optimal point
    pub binding_constraints: Vec<String>,
    pub chart: ChartData,
}

impl Solution {
    pub fn optimal_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| v.is_optimal)
    }

    /// More than one vertex attains the optimum (an optimal edge)
    pub fn has_multiple_optima(&self) -> bool {
        self.optimal_vertices().count() > 1
    }
}
