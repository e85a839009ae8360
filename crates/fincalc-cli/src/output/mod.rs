pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use fincalc_core::{GroupingStyle, NumberFormat};
use serde_json::Value;

/// Dispatch output to the appropriate formatter. Only the table view groups
/// digits; machine formats keep raw numbers.
pub fn format_output(format: &OutputFormat, value: &Value, fmt: &NumberFormat<GroupingStyle>) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, fmt),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
