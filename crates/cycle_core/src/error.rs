use thiserror::Error;

/// Rejected cycle parameters. Raised at construction and when a stored config is decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleConfigError {
    #[error("cycle length must be greater than zero")]
    CycleLengthNotPositive,
    #[error("period length must be greater than zero")]
    PeriodLengthNotPositive,
    #[error("period length ({period_length}) must be shorter than cycle length ({cycle_length})")]
    PeriodNotShorterThanCycle {
        period_length: u32,
        cycle_length: u32,
    },
}

/// A mood or symptom name that matches no known tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownTagError {
    pub kind: &'static str,
    pub value: String,
}
