use crate::problem::{Constraint, Point, Sense};

impl Constraint {
    pub fn is_satisfied_by(&self, point: Point, tolerance: f64) -> bool {
        let value = self.expr.eval(point);
        match self.sense {
            Sense::Le => value <= self.rhs + tolerance,
            Sense::Ge => value >= self.rhs - tolerance,
            Sense::Eq => (value - self.rhs).abs() <= tolerance,
        }
    }

    /// The point lies on this constraint's boundary line
    pub fn is_binding_at(&self, point: Point, tolerance: f64) -> bool {
        (self.expr.eval(point) - self.rhs).abs() <= tolerance
    }
}

/// Whether `point` satisfies every constraint in `constraints`.
///
/// Non-negativity is checked first regardless of whether `constraints`
/// already carries it.
pub fn is_feasible(point: Point, constraints: &[Constraint], tolerance: f64) -> bool {
    if point.x1 < -tolerance || point.x2 < -tolerance {
        return false;
    }
    constraints.iter().all(|c| c.is_satisfied_by(point, tolerance))
}
