// Number formatting for human-readable reports

/// Format `value` with `decimals` fraction digits and comma thousands separators.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // -0.00 renders as 0.00
    let nonzero = fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value.is_sign_negative() && nonzero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0.0, 2), "0.00");
        assert_eq!(with_thousands(999.0, 1), "999.0");
        assert_eq!(with_thousands(1000.0, 2), "1,000.00");
        assert_eq!(with_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(with_thousands(12345.4, 0), "12,345");
        assert_eq!(with_thousands(-4075.26, 1), "-4,075.3");
        assert_eq!(with_thousands(-0.001, 2), "0.00");
    }
}
