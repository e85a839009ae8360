pub mod investment;
pub mod loan;
pub mod numbers;
pub mod session;

use fincalc_core::{normalize, Calculator};

/// Overlay the flags that were given onto `base`, running each through the
/// normalizer. Unlike an interactive edit, text that is not a number is an
/// error here.
pub fn apply_flags<C: Calculator>(
    base: C,
    flags: &[(C::Field, Option<&str>)],
) -> Result<C, Box<dyn std::error::Error>> {
    let mut input = base;
    for (field, raw) in flags {
        if let Some(raw) = raw {
            let value = normalize(*raw).map_err(|e| format!("--{field}: {e}"))?;
            input = input.with_field(*field, value);
        }
    }
    Ok(input)
}
