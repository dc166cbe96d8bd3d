//! Permissive number parsing for form and spreadsheet input.
//!
//! Values arrive as typed by a user or copied out of a spreadsheet:
//! - thousands separators ("2,118,940")
//! - currency markers ("AED 2.5M" is not supported, "AED 2,500,000" is)
//! - unit suffixes ("1,250 sq.ft")
//! - trailing percent signs ("40%")
//!
//! Anything left that does not parse as a finite number is `None`; callers
//! treat that as zero.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Currency markers, Latin and Arabic
    static ref CURRENCY: Regex = Regex::new(r"(?i)(dirhams?|dhs?\.?|aed|د\.إ)").unwrap();

    /// Area unit suffixes
    static ref AREA_UNIT: Regex = Regex::new(r"(?i)(sq\.?\s*ft\.?|sqft|sq\.?\s*m\.?|sqm|m2|m²)").unwrap();

    /// Separators and decoration that carry no numeric meaning
    static ref NOISE: Regex = Regex::new(r"[,\s%]").unwrap();
}

/// Parse a raw textual value into a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let stripped = CURRENCY.replace_all(raw, "");
    let stripped = AREA_UNIT.replace_all(&stripped, "");
    let cleaned = NOISE.replace_all(&stripped, "");

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Collapse NaN and infinities to zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `Math.round` semantics: halves round toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // keep -0.0 out of the output map
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
