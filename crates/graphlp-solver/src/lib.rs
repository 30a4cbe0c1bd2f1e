mod config;
mod error;
mod feasibility;
mod intersect;
mod plot;
mod problem;
mod solution;
mod solver;

pub use config::SolverConfig;
pub use error::SolveError;
pub use feasibility::is_feasible;
pub use intersect::{enumerate as enumerate_intersections, intersect, Intersections};
pub use plot::{build_chart, line_color, ChartData, PlotPoint, Segment};
pub use problem::{BoundaryLine, Constraint, Direction, LinearExpr, LpProblem, Objective, Point, Sense};
pub use solution::{Solution, Vertex};
pub use solver::Solver;
