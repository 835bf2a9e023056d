//! Display formatting for catalog values.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Format whole rupiah as `Rp 1.250.000` (dot thousands separator, no decimals).
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 { format!("-Rp {grouped}") } else { format!("Rp {grouped}") }
}

/// Pagination label such as `Page 2 of 5`; unknown totals show the page alone.
#[must_use]
pub fn page_label(page: u32, total_pages: u32) -> String {
    if total_pages == 0 { format!("Page {page}") } else { format!("Page {page} of {total_pages}") }
}
