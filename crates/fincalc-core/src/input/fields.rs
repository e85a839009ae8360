use serde::Serialize;

/// Slider/text-box descriptor for one calculator input.
///
/// Bounds are hints for the UI. Nothing in the core clamps to them; they
/// only feed warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn out_of_range_warning(&self, value: f64) -> Option<String> {
        if self.contains(value) {
            None
        } else {
            Some(format!(
                "{} of {} is outside the usual range {}–{}",
                self.label, value, self.min, self.max
            ))
        }
    }

    /// Position for a slider thumb: the value itself, or 0 when it is not a
    /// finite number.
    pub fn slider_position(&self, value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: FieldSpec = FieldSpec {
        key: "rate",
        label: "Interest Rate (% P.A.)",
        min: 1.0,
        max: 30.0,
        step: 0.1,
        unit: "%",
    };

    #[test]
    fn test_contains_is_inclusive() {
        assert!(RATE.contains(1.0));
        assert!(RATE.contains(30.0));
        assert!(!RATE.contains(0.5));
        assert!(!RATE.contains(f64::NAN));
    }

    #[test]
    fn test_warning_only_out_of_range() {
        assert!(RATE.out_of_range_warning(12.0).is_none());
        let w = RATE.out_of_range_warning(45.0).unwrap();
        assert!(w.contains("Interest Rate"));
        assert!(w.contains("45"));
    }

    #[test]
    fn test_slider_position_falls_back_to_zero() {
        assert_eq!(RATE.slider_position(7.5), 7.5);
        assert_eq!(RATE.slider_position(f64::NAN), 0.0);
        assert_eq!(RATE.slider_position(f64::INFINITY), 0.0);
    }
}
