// ---------------------------------------------------------------------------
// Numeric display formatting
// ---------------------------------------------------------------------------

/// Currency text with thousands separators and two decimals:
/// `1234567.8` → `"$1,234,567.80"`. Non-finite values render as "n/a".
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Optional currency figure; `None` renders as "n/a".
pub fn format_currency_opt(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}

/// Signed percentage with one decimal: `+20.0%`, `-46.2%`. `None` (an
/// undefined deviation, e.g. against a zero mean) renders as "n/a".
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}%"),
        None => "n/a".to_string(),
    }
}
