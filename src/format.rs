//! Shared number formatting for tick labels and tooltips.

/// Default tick label: integers without decimals, everything else to two places.
pub fn format_tick(val: f64) -> String {
    // normalize `-0.0`
    let val = if val == 0.0 { 0.0 } else { val };

    if val.is_finite() && val.fract() == 0.0 {
        format!("{:.0}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Format a data value with smart precision.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format a pixel coordinate for vector output, trimming trailing zeros.
pub fn format_coord(val: f64) -> String {
    let s = format!("{:.3}", val);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}
