use serde_json::Value;

/// A derived metric: `None` is the "unavailable" marker and serializes as `null`.
pub type Metric = Option<f64>;

/// Null-safe ratio. Zero or non-finite denominators yield `None`, as does any
/// non-finite numerator or quotient.
pub fn safe_div(num: f64, den: f64) -> Metric {
    if den == 0.0 || !den.is_finite() || !num.is_finite() {
        return None;
    }
    let out = num / den;
    out.is_finite().then_some(out)
}

/// [`safe_div`] over operands that may themselves be unavailable.
pub fn safe_div_opt(num: Metric, den: Metric) -> Metric {
    safe_div(num?, den?)
}

/// Convert an officially reported percentage ("49.6", 49.6, "49.6%") to a 0-1 fraction.
pub fn pct_to_fraction(value: &Value) -> Metric {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_percent(s)?,
        _ => return None,
    };
    safe_div(raw, 100.0)
}

/// [`pct_to_fraction`] for a field that may be absent entirely.
pub fn opt_pct_to_fraction(value: Option<&Value>) -> Metric {
    value.and_then(pct_to_fraction)
}

fn parse_percent(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_end_matches('%').trim_end();
    if s.is_empty() || s == "-" {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
