use std::fmt;
use std::str::FromStr;

use crate::error::SolveError;

/// Objective or constraint left-hand side: `c1*x1 + c2*x2`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearExpr {
    pub c1: f64,
    pub c2: f64,
}

impl LinearExpr {
    pub fn new(c1: f64, c2: f64) -> Self {
        Self { c1, c2 }
    }

    pub fn eval(&self, point: Point) -> f64 {
        self.c1 * point.x1 + self.c2 * point.x2
    }
}

/// Optimization direction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Max,
    Min,
}

impl FromStr for Direction {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MAX" => Ok(Direction::Max),
            "MIN" => Ok(Direction::Min),
            _ => Err(SolveError::Format {
                text: s.to_string(),
                hint: "MAX or MIN",
                reason: "unknown objective type".to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Max => write!(f, "MAX"),
            Direction::Min => write!(f, "MIN"),
        }
    }
}

/// Relational operator of a constraint
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => write!(f, "<="),
            Sense::Ge => write!(f, ">="),
            Sense::Eq => write!(f, "="),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub expr: LinearExpr,
    pub direction: Direction,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Original text, kept for display
    pub label: String,
    pub expr: LinearExpr,
    pub sense: Sense,
    /// Right-hand side value
    pub rhs: f64,
}

impl Constraint {
    pub fn new(label: impl Into<String>, expr: LinearExpr, sense: Sense, rhs: f64) -> Self {
        Self {
            label: label.into(),
            expr,
            sense,
            rhs,
        }
    }

    /// `x1 >= 0` and `x2 >= 0`
    pub fn non_negativity() -> [Constraint; 2] {
        [
            Constraint::new("x1 >= 0", LinearExpr::new(1.0, 0.0), Sense::Ge, 0.0),
            Constraint::new("x2 >= 0", LinearExpr::new(0.0, 1.0), Sense::Ge, 0.0),
        ]
    }

    pub fn boundary(&self) -> BoundaryLine {
        BoundaryLine {
            label: self.label.clone(),
            expr: self.expr,
            rhs: self.rhs,
        }
    }

    /// `C1*x1 + C2*x2 <= B`
    pub fn canonical(&self) -> String {
        let sign = if self.expr.c2 < 0.0 { '-' } else { '+' };
        format!(
            "{}*x1 {} {}*x2 {} {}",
            self.expr.c1,
            sign,
            self.expr.c2.abs(),
            self.sense,
            self.rhs
        )
    }
}

/// Equality form of a constraint or coordinate axis
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLine {
    pub label: String,
    pub expr: LinearExpr,
    pub rhs: f64,
}

impl BoundaryLine {
    /// `x1 = 0` and `x2 = 0`
    pub fn axes() -> [BoundaryLine; 2] {
        [
            BoundaryLine {
                label: "x2 axis (x1=0)".to_string(),
                expr: LinearExpr::new(1.0, 0.0),
                rhs: 0.0,
            },
            BoundaryLine {
                label: "x1 axis (x2=0)".to_string(),
                expr: LinearExpr::new(0.0, 1.0),
                rhs: 0.0,
            },
        ]
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x1: f64,
    pub x2: f64,
}

impl Point {
    pub fn new(x1: f64, x2: f64) -> Self {
        Self { x1, x2 }
    }

    /// Round both coordinates to `precision` decimals; `-0.0` becomes `0.0`.
    ///
    /// Coordinates too large to scale are already integral and kept as-is.
    pub fn rounded(self, precision: u32) -> Self {
        let factor = 10f64.powi(precision as i32);
        let round = |v: f64| {
            let scaled = v * factor;
            if !scaled.is_finite() {
                return v;
            }
            let r = scaled.round() / factor;
            if r == 0.0 { 0.0 } else { r }
        };
        Self {
            x1: round(self.x1),
            x2: round(self.x2),
        }
    }

    /// Set-membership key for an already rounded point
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.x1.to_bits(), self.x2.to_bits())
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite()
    }
}

/// A two-variable linear program
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    pub objective: Objective,
    /// Structural constraints, in submission order
    pub constraints: Vec<Constraint>,
}

impl LpProblem {
    pub fn new(objective: LinearExpr, direction: Direction) -> Self {
        Self {
            objective: Objective {
                expr: objective,
                direction,
            },
            constraints: Vec::new(),
        }
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Structural boundary lines followed by the two axes
    pub fn boundary_lines(&self) -> Vec<BoundaryLine> {
        let mut lines: Vec<BoundaryLine> = self.constraints.iter().map(Constraint::boundary).collect();
        lines.extend(BoundaryLine::axes());
        lines
    }

    /// Structural constraints followed by non-negativity
    pub fn feasibility_set(&self) -> Vec<Constraint> {
        let mut all = self.constraints.clone();
        all.extend(Constraint::non_negativity());
        all
    }
}
