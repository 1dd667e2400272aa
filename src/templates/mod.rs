pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, hostel_card};
pub use layouts::desktop::desktop_layout;

/// `1704067200` -> `Jan 01, 2024`. Out-of-range stamps render empty.
pub fn format_date(unix: i64) -> String {
    chrono::DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_default()
}

/// `15000` -> `PKR 15,000`.
pub fn format_price(price: i64) -> String {
    let digits = price.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("PKR {sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(0), "PKR 0");
        assert_eq!(format_price(950), "PKR 950");
        assert_eq!(format_price(15000), "PKR 15,000");
        assert_eq!(format_price(1234567), "PKR 1,234,567");
    }

    #[test]
    fn dates_render_short_form() {
        assert_eq!(format_date(1704067200), "Jan 01, 2024");
    }
}
