//! Amount formatting shared by the CLI, server, and insight messages

/// Currency label used when no configuration overrides it
pub const DEFAULT_CURRENCY: &str = "MMK";

/// Format a value as a rounded integer with comma thousands separators
///
/// `1234567.6` becomes `"1,234,568"`.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount followed by its currency label, e.g. `"12,500 MMK"`
pub fn format_currency(value: f64, currency: &str) -> String {
    format!("{} {}", format_grouped(value), currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(1234567.6), "1,234,568");
        assert_eq!(format_grouped(-20000.0), "-20,000");
        assert_eq!(format_grouped(-0.2), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12500.0, "MMK"), "12,500 MMK");
    }
}
