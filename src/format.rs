//! Currency and date formatting shared by tables, cards and charts.
//! Every view goes through `currency` so the rendering never drifts
//! between the list, the summary cards and the chart labels.

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a backend amount as a two-decimal dollar string.
/// Missing or non-finite values render as `$0.00`, never `$NaN`.
pub fn currency(amount: Option<f64>) -> String {
    let value = match amount {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    };
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// One-decimal percentage, as the backend reports budget usage.
pub fn percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Filename for a CSV export, stamped with the client's current date
/// (`date_stamp` is `YYYY-MM-DD`).
pub fn export_filename(date_stamp: &str) -> String {
    format!("expenses_{}.csv", date_stamp)
}

/// Today's date as `YYYY-MM-DD`, read from the browser clock. The date
/// inputs and the export filename both stamp through here.
pub fn today() -> String {
    js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default()
        .chars()
        .take(10)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_renders_two_decimals_with_grouping() {
        assert_eq!(currency(Some(0.0)), "$0.00");
        assert_eq!(currency(Some(50.0)), "$50.00");
        assert_eq!(currency(Some(1234.5)), "$1,234.50");
        assert_eq!(currency(Some(1_000_000.0)), "$1,000,000.00");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(currency(Some(19.999)), "$20.00");
        assert_eq!(currency(Some(0.005)), "$0.01");
    }

    #[test]
    fn currency_handles_negatives() {
        assert_eq!(currency(Some(-42.3)), "-$42.30");
    }

    #[test]
    fn missing_amount_is_zero_not_nan() {
        assert_eq!(currency(None), "$0.00");
        assert_eq!(currency(Some(f64::NAN)), "$0.00");
        assert_eq!(currency(Some(f64::INFINITY)), "$0.00");
    }

    #[test]
    fn percentage_keeps_one_decimal() {
        assert_eq!(percentage(87.25), "87.2%");
        assert_eq!(percentage(100.0), "100.0%");
    }

    #[test]
    fn export_filename_is_date_stamped() {
        assert_eq!(export_filename("2024-01-15"), "expenses_2024-01-15.csv");
    }
}
