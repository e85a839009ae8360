pub mod display;
pub mod error;
pub mod input;
pub mod session;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "investment")]
pub mod investment;

pub use display::{format_number, DigitGrouping, GroupingStyle, NumberFormat};
pub use error::CalcError;
pub use input::{normalize, RawInput};
pub use session::{Calculator, Session};
pub use types::*;

/// Standard result type for all fincalc operations
pub type CalcResult<T> = Result<T, CalcError>;
