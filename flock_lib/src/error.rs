use thiserror::Error;

/// Rejected [`SimParams`](crate::options::SimParams) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("radius `{name}` must not be negative, got {value}")]
    NegativeRadius { name: &'static str, value: f64 },

    #[error("max_speed must be positive, got {0}")]
    NonPositiveMaxSpeed(f64),

    #[error("arena radius {0} is too large to sample spawn positions from")]
    ArenaTooLarge(f64),
}
