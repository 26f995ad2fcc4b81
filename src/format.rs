// Locale-aware display strings for amounts and movement dates
// Only the handful of locales the demo accounts use get special treatment;
// everything else falls back to the continental style.

use chrono::{DateTime, Utc};

struct LocaleStyle {
    group: char,
    decimal: char,
    symbol_first: bool,
}

fn locale_style(locale: &str) -> LocaleStyle {
    let language = locale.split(['-', '_']).next().unwrap_or("");

    match language {
        "en" => LocaleStyle {
            group: ',',
            decimal: '.',
            symbol_first: true,
        },
        "de" => LocaleStyle {
            group: '.',
            decimal: ',',
            symbol_first: false,
        },
        _ => LocaleStyle {
            group: ' ',
            decimal: ',',
            symbol_first: false,
        },
    }
}

/// Symbol for an ISO 4217 code, or the code itself when unknown
pub fn currency_symbol(currency: &str) -> &str {
    match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        other => other,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Format an amount with two decimals in the account's locale and currency
///
/// `format_currency(1234.5, "en-US", "USD")` → `"$1,234.50"`,
/// `format_currency(-306.5, "pt-PT", "EUR")` → `"-306,50 €"`.
pub fn format_currency(value: f64, locale: &str, currency: &str) -> String {
    let style = locale_style(locale);
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let number = format!(
        "{}{}{}",
        group_digits(int_part, style.group),
        style.decimal,
        frac_part
    );
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    let symbol = currency_symbol(currency);

    if style.symbol_first {
        format!("{}{}{}", sign, symbol, number)
    } else {
        format!("{}{} {}", sign, number, symbol)
    }
}

/// Relative label for recent movements, locale-ordered date otherwise
pub fn format_movement_date(date: DateTime<Utc>, now: DateTime<Utc>, locale: &str) -> String {
    let days_passed = (now.date_naive() - date.date_naive()).num_days().abs();

    match days_passed {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=7 => format!("{} days ago", days_passed),
        _ => {
            let pattern = match locale {
                "en-US" => "%m/%d/%Y",
                l if l.starts_with("de") => "%d.%m.%Y",
                _ => "%d/%m/%Y",
            };
            date.format(pattern).to_string()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
