pub mod format;

pub use format::{format_number, DigitGrouping, GroupingStyle, NumberFormat};
