// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TEXT UTILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Formatação de números e datas para telas e relatórios:
// - Separador de milhar (1,234.56)
// - Datas dd/mm/aaaa
// - Truncation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use chrono::{Duration, NaiveDate};

/// Formato de data usado nos relatórios
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formata número com separador de milhar `,` e `decimals` casas.
///
/// ```rust
/// use simulador_pecuario::utils::format_thousands;
///
/// assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_thousands(-7320.0, 0), "-7,320");
/// ```
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formata valor monetário: `$1,234.56`
pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_thousands(-value, 2))
    } else {
        format!("${}", format_thousands(value, 2))
    }
}

/// Formata data como dd/mm/aaaa
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Data final de um período de `days` dias
pub fn end_date(start: NaiveDate, days: u32) -> NaiveDate {
    start + Duration::days(i64::from(days))
}

/// Trunca texto para no máximo `max_chars` caracteres (com "...")
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(999.999, 2), "1,000.00");
        assert_eq!(format_thousands(20000.0, 0), "20,000");
        assert_eq!(format_thousands(123.4, 2), "123.40");
        assert_eq!(format_thousands(-5732.508, 2), "-5,732.51");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(307.43), "$307.43");
        assert_eq!(format_money(-1500.0), "-$1,500.00");
    }

    #[test]
    fn test_dates() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = end_date(start, 365);
        assert_eq!(format_date(start), "01/01/2026");
        assert_eq!(format_date(end), "01/01/2027");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Recria", 10), "Recria");
        assert_eq!(truncate("Confinamento", 8), "Confi...");
    }
}
