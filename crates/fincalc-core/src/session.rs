use std::fmt;

use crate::display::{DigitGrouping, NumberFormat};
use crate::input::{normalize, RawInput};

/// An input set that can be edited one field at a time and recomputed.
///
/// Inputs are values: `with_field` returns a new input and leaves `self`
/// alone. `compute` must be a pure function of the input.
pub trait Calculator: Clone + Default {
    type Field: Copy + fmt::Debug + fmt::Display;
    type Output: Clone + fmt::Debug;

    fn with_field(&self, field: Self::Field, value: f64) -> Self;
    fn field_value(&self, field: Self::Field) -> f64;
    fn compute(&self) -> Self::Output;
}

/// Current input of one calculator plus the output derived from it.
///
/// Every accepted edit replaces the input wholesale and recomputes the
/// output; rejected edits leave both untouched.
#[derive(Debug, Clone)]
pub struct Session<C: Calculator> {
    input: C,
    output: C::Output,
}

impl<C: Calculator> Session<C> {
    pub fn new(input: C) -> Self {
        let output = input.compute();
        Session { input, output }
    }

    pub fn input(&self) -> &C {
        &self.input
    }

    pub fn output(&self) -> &C::Output {
        &self.output
    }

    /// Apply a raw edit. Returns `false` (and changes nothing) when the text
    /// does not normalize to a number.
    pub fn edit(&mut self, field: C::Field, raw: impl Into<RawInput>) -> bool {
        match normalize(raw) {
            Ok(value) => {
                self.set(field, value);
                true
            }
            Err(e) => {
                log::debug!("ignoring edit to {field}: {e}");
                false
            }
        }
    }

    /// Apply an already-numeric edit.
    pub fn set(&mut self, field: C::Field, value: f64) {
        self.input = self.input.with_field(field, value);
        self.output = self.input.compute();
        log::debug!("{field} = {value}; recomputed {:?}", self.output);
    }

    /// Text-box rendering of the current value of `field`.
    pub fn display_value<G: DigitGrouping>(&self, field: C::Field, fmt: &NumberFormat<G>) -> String {
        fmt.format_f64(self.input.field_value(field))
    }
}

impl<C: Calculator> Default for Session<C> {
    fn default() -> Self {
        Session::new(C::default())
    }
}
