/// Numeric settings shared by the intersector, feasibility filter and plot builder
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Slack for feasibility and optimality comparisons
    pub tolerance: f64,
    /// Decimal places kept when de-duplicating intersection points
    pub precision: u32,
    /// Smallest display scale
    pub scale_floor: f64,
    /// Headroom applied to non-negative points when growing the scale
    pub scale_factor: f64,
    /// Below this a coefficient counts as zero for plotting
    pub intercept_epsilon: f64,
    /// Relative determinant threshold for parallel lines
    pub singular_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            precision: 6,
            scale_floor: 50.0,
            scale_factor: 1.2,
            intercept_epsilon: 1e-9,
            singular_epsilon: 1e-12,
        }
    }
}
