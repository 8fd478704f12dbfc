use serde::{Deserialize, Serialize};

use crate::core::PlotParameters;

/// Raw text of the plot form fields, as read from the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotInputFields {
    pub expression: String,
    pub min_x: String,
    pub max_x: String,
    pub min_y: String,
    pub max_y: String,
    pub interval_count: String,
    pub resolution: String,
}

impl PlotInputFields {
    /// Coerces every field the way a browser `Number(...)` call does.
    ///
    /// Coercion never fails: unparsable bounds become NaN and are rejected by
    /// validation, unparsable counts become `0`.
    #[must_use]
    pub fn to_parameters(&self) -> PlotParameters {
        PlotParameters {
            expression: self.expression.clone(),
            min_x: coerce_real(&self.min_x),
            max_x: coerce_real(&self.max_x),
            min_y: coerce_real(&self.min_y),
            max_y: coerce_real(&self.max_y),
            interval_count: coerce_integer(&self.interval_count),
            resolution: coerce_integer(&self.resolution),
        }
    }
}

/// Empty or blank text is `0`; anything unparsable is NaN.
#[must_use]
pub fn coerce_real(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.eq_ignore_ascii_case("inf")
            || trimmed.eq_ignore_ascii_case("+inf")
            || trimmed.eq_ignore_ascii_case("-inf")
            || trimmed.eq_ignore_ascii_case("infinity")
            || trimmed.eq_ignore_ascii_case("nan") =>
        {
            f64::NAN
        }
        _ => radix_literal(trimmed).unwrap_or_else(|| trimmed.parse::<f64>().unwrap_or(f64::NAN)),
    }
}

/// Unsigned `0x`, `0o` and `0b` literals; `None` when `text` has no such prefix.
fn radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Truncates toward zero and saturates; NaN becomes `0`.
#[must_use]
pub fn coerce_integer(text: &str) -> i64 {
    coerce_real(text) as i64
}
