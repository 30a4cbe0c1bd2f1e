//! Form-field collection and the error-or-results outcome handed back to a
//! presentation layer.

use std::collections::BTreeMap;

use graphlp_solver::{ChartData, Direction, LpProblem, Solution, SolveError, Solver, Vertex};

use crate::parser::Parser;

pub const OBJECTIVE_TYPE_FIELD: &str = "objective_type";
pub const OBJECTIVE_FIELD: &str = "objective_func";
pub const CONSTRAINT_PREFIX: &str = "restriction_";

/// Raw text of one solve request
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    pub objective_type: String,
    pub objective_func: String,
    /// Non-empty constraint lines in field-key order
    pub constraints: Vec<String>,
}

impl Default for SolveRequest {
    fn default() -> Self {
        Self {
            objective_type: Direction::Max.to_string(),
            objective_func: String::new(),
            constraints: Vec::new(),
        }
    }
}

impl SolveRequest {
    pub fn new(objective_type: impl Into<String>, objective_func: impl Into<String>) -> Self {
        Self {
            objective_type: objective_type.into(),
            objective_func: objective_func.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, text: impl Into<String>) -> Self {
        self.constraints.push(text.into());
        self
    }

    /// Collect a request from `(key, value)` form fields.
    ///
    /// Constraint fields are those whose key starts with `restriction_`,
    /// taken in lexical key order; blank values are skipped. Unknown keys are
    /// ignored.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let objective_type = fields
            .get(OBJECTIVE_TYPE_FIELD)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| Direction::Max.to_string());
        let objective_func = fields.get(OBJECTIVE_FIELD).cloned().unwrap_or_default();
        let constraints = fields
            .iter()
            .filter(|(k, v)| k.starts_with(CONSTRAINT_PREFIX) && !v.trim().is_empty())
            .map(|(_, v)| v.clone())
            .collect();

        Self {
            objective_type,
            objective_func,
            constraints,
        }
    }

    /// Parse every field into a problem, stopping at the first error
    pub fn to_problem(&self) -> Result<LpProblem, SolveError> {
        let direction: Direction = self.objective_type.parse()?;
        let objective = Parser::parse_objective(&self.objective_func)?;

        let mut problem = LpProblem::new(objective, direction);
        for text in &self.constraints {
            problem.add_constraint(Parser::parse_constraint(text)?);
        }
        if problem.constraints.is_empty() {
            return Err(SolveError::NoStructuralConstraints);
        }

        tracing::debug!(
            direction = %direction,
            constraints = problem.num_constraints(),
            "request parsed"
        );
        Ok(problem)
    }

    /// Every field problem at once, for form validation
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if let Err(e) = self.objective_type.parse::<Direction>() {
            diagnostics.push(Diagnostic::new(OBJECTIVE_TYPE_FIELD, e));
        }
        if let Err(e) = Parser::parse_objective(&self.objective_func) {
            diagnostics.push(Diagnostic::new(OBJECTIVE_FIELD, e.into()));
        }
        for (i, text) in self.constraints.iter().enumerate() {
            if let Err(e) = Parser::parse_constraint(text) {
                diagnostics.push(Diagnostic::new(format!("constraint {}", i + 1), e.into()));
            }
        }
        if self.constraints.is_empty() {
            diagnostics.push(Diagnostic::new("constraints", SolveError::NoStructuralConstraints));
        }
        diagnostics
    }

    pub fn solve(&self, solver: &Solver) -> Result<Solution, SolveError> {
        let problem = self.to_problem()?;
        solver.solve(&problem)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub field: String,
    pub message: String,
}

impl Diagnostic {
    fn new(field: impl Into<String>, error: SolveError) -> Self {
        Self {
            field: field.into(),
            message: error.to_string(),
        }
    }
}

/// Optimum and vertex table of a solved request
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    /// `(x1, x2)`
    pub optimal_point: (f64, f64),
    pub optimal_value: f64,
    pub vertices: Vec<Vertex>,
    pub binding_constraints: Vec<String>,
}

/// Either an error message or the results with their chart, never both
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Error { error: String },
    Solved { results: Results, chart: ChartData },
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }
}

impl From<Solution> for Outcome {
    fn from(solution: Solution) -> Self {
        Outcome::Solved {
            results: Results {
                optimal_point: (solution.optimal_point.x1, solution.optimal_point.x2),
                optimal_value: solution.optimal_value,
                vertices: solution.vertices,
                binding_constraints: solution.binding_constraints,
            },
            chart: solution.chart,
        }
    }
}

impl From<Result<Solution, SolveError>> for Outcome {
    fn from(result: Result<Solution, SolveError>) -> Self {
        match result {
            Ok(solution) => solution.into(),
            Err(e) => {
                tracing::debug!(error = %e, "solve failed");
                Outcome::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Run one request end to end
pub fn solve(request: &SolveRequest, solver: &Solver) -> Outcome {
    request.solve(solver).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_sorted_and_filtered() {
        let request = SolveRequest::from_fields([
            ("restriction_2", "x1+2*x2<=6"),
            ("csrfmiddlewaretoken", "abc"),
            ("objective_func", "5*x1+4*x2"),
            ("restriction_1", "6*x1+4*x2<=24"),
            ("restriction_3", "   "),
        ]);
        assert_eq!(request.objective_type, "MAX");
        assert_eq!(request.constraints, vec!["6*x1+4*x2<=24", "x1+2*x2<=6"]);
    }

    #[test]
    fn test_solve_production_mix() {
        let request = SolveRequest::new("MAX", "5*x1+4*x2")
            .with_constraint("6*x1+4*x2<=24")
            .with_constraint("x1+2*x2<=6");
        match solve(&request, &Solver::new()) {
            Outcome::Solved { results, chart } => {
                assert_eq!(results.optimal_point, (3.0, 1.5));
                assert!((results.optimal_value - 21.0).abs() < 1e-6);
                assert_eq!(chart.lines.len(), 4);
            }
            Outcome::Error { error } => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn test_no_constraints() {
        let request = SolveRequest::from_fields([("objective_func", "x1+x2"), ("restriction_1", "")]);
        assert_eq!(request.to_problem(), Err(SolveError::NoStructuralConstraints));
        assert!(solve(&request, &Solver::new()).is_error());
    }

    #[test]
    fn test_objective_errors_reported_first() {
        let request = SolveRequest::new("MAX", "3*y").with_constraint("x1<=");
        match request.to_problem() {
            Err(SolveError::Format { hint, .. }) => assert_eq!(hint, "C1*x1 + C2*x2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_bad_direction() {
        let request = SolveRequest::new("BEST", "x1").with_constraint("x1<=1");
        assert!(matches!(request.to_problem(), Err(SolveError::Format { .. })));
    }

    #[test]
    fn test_diagnostics_cover_every_field() {
        let request = SolveRequest::new("MAX", "x1+x2")
            .with_constraint("x1<=4")
            .with_constraint("x1 x2 <= 3")
            .with_constraint("0x1+0x2>=1");
        let diagnostics = request.diagnostics();
        let fields: Vec<&str> = diagnostics.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["constraint 2", "constraint 3"]);
    }

    #[test]
    fn test_infeasible_outcome_message() {
        let request = SolveRequest::new("MIN", "x1+x2")
            .with_constraint("x1+x2<=1")
            .with_constraint("x1+x2>=3");
        match solve(&request, &Solver::new()) {
            Outcome::Error { error } => assert!(error.contains("feasible region is empty")),
            Outcome::Solved { .. } => panic!("expected an error"),
        }
    }
}
