pub mod error;
pub mod numeric;
pub mod presets;
pub mod tax;
pub mod types;

#[cfg(feature = "payroll")]
pub mod payroll;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::FundSimError;
pub use types::*;

/// Standard result type for all fundsim operations
pub type FundSimResult<T> = Result<T, FundSimError>;
