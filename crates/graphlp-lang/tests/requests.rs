use graphlp_lang::{solve, Outcome, Parser, SolveRequest};
use graphlp_solver::{Constraint, LinearExpr, Sense, SolveError, Solver};
use proptest::prelude::*;

fn sense() -> impl Strategy<Value = Sense> {
    prop_oneof![Just(Sense::Le), Just(Sense::Ge), Just(Sense::Eq)]
}

proptest! {
    #[test]
    fn canonical_form_reparses_to_same_triple(
        c1 in -1000.0f64..1000.0,
        c2 in -1000.0f64..1000.0,
        rhs in 0.0f64..10000.0,
        sense in sense(),
    ) {
        prop_assume!(c1 != 0.0 || c2 != 0.0);
        let original = Constraint::new("c", LinearExpr::new(c1, c2), sense, rhs);
        let text = original.canonical();
        let parsed = Parser::parse_constraint(&text).unwrap();
        prop_assert_eq!(parsed.expr, original.expr);
        prop_assert_eq!(parsed.sense, sense);
        prop_assert_eq!(parsed.rhs, rhs);
    }

    #[test]
    fn garbage_never_panics(text in "[x0-9+*<>=. -]{0,16}") {
        let _ = Parser::parse_constraint(&text);
        let _ = Parser::parse_objective(&text);
    }
}

#[test]
fn form_submission_end_to_end() {
    let fields = [
        ("objective_type", "MAX"),
        ("objective_func", "5*x1 + 4*x2"),
        ("restriction_1", "6*x1 + 4*x2 <= 24"),
        ("restriction_2", "x1 + 2*x2 <= 6"),
    ];
    let outcome = solve(&SolveRequest::from_fields(fields), &Solver::new());
    let (results, chart) = match outcome {
        Outcome::Solved { results, chart } => (results, chart),
        Outcome::Error { error } => panic!("expected a solution, got {error}"),
    };
    assert!((results.optimal_point.0 - 3.0).abs() < 1e-6);
    assert!((results.optimal_point.1 - 1.5).abs() < 1e-6);
    assert!((results.optimal_value - 21.0).abs() < 1e-6);
    assert_eq!(results.binding_constraints.len(), 2);
    assert_eq!(chart.lines[0].label, "6*x1 + 4*x2 <= 24");
}

#[test]
fn minimum_over_open_region() {
    let request = SolveRequest::new("MIN", "x1+x2").with_constraint("x1+x2>=4");
    let solution = request.solve(&Solver::new()).unwrap();
    assert!((solution.optimal_value - 4.0).abs() < 1e-6);
    assert_eq!(solution.optimal_vertices().count(), 2);
}

#[test]
fn missing_constraint_fields() {
    let request = SolveRequest::from_fields([("objective_type", "MIN"), ("objective_func", "x1")]);
    assert_eq!(request.solve(&Solver::new()), Err(SolveError::NoStructuralConstraints));
}

#[test]
fn origin_only_region() {
    for objective in ["3*x1+2*x2", "-x1-x2"] {
        let request = SolveRequest::new("MAX", objective)
            .with_constraint("x1<=0")
            .with_constraint("x2<=0");
        let solution = request.solve(&Solver::new()).unwrap();
        assert_eq!(solution.vertices.len(), 1);
        assert_eq!(solution.optimal_value, 0.0);
    }
}
