use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid format: {text}. Use {hint} ({reason})")]
    Format {
        text: String,
        hint: &'static str,
        reason: String,
    },
    #[error("At least one structural constraint is required")]
    NoStructuralConstraints,
    #[error("The feasible region is empty (inconsistent problem) or the problem is unbounded")]
    InfeasibleOrUnbounded,
    #[error("Unexpected error during computation: {0}")]
    UnexpectedComputation(String),
}
