//! # Invoice Rendering
//!
//! Plain-text invoice for a committed sale: a narrow, fixed-width receipt
//! that prints on 48mm paper and pastes cleanly into a chat message. The
//! embedded UPI payment link is what an external QR renderer encodes.
//!
//! All of this is pure string formatting over a [`SaleReceipt`]; delivery
//! (printing, sharing) is the caller's concern.

use crate::money::Money;
use crate::sale::SaleReceipt;
use crate::types::{CatalogEntry, UpiProfile};
use crate::upi::payment_uri;

/// Characters of content between the box borders.
const INNER_WIDTH: usize = 25;

/// Item-name column width; longer names are truncated with `...`.
const NAME_WIDTH: usize = 12;

/// Width for free-text fields outside the box (customer name, UPI fields).
const FIELD_WIDTH: usize = 22;

/// Renders the full invoice text for a committed sale.
pub fn invoice_text(receipt: &SaleReceipt, upi: &UpiProfile) -> String {
    let mut out = String::new();

    boxed_title(&mut out, "BILL");

    if let Some(CatalogEntry::Customer { name, phone, .. }) = &receipt.customer {
        out.push_str(&format!("Cust: {}\n", fit(name, FIELD_WIDTH)));
        out.push_str(&format!("Ph: {}\n", phone));
    }

    let local = receipt.record.timestamp;
    out.push_str(&format!("Dt: {}\n", local.format("%d/%m/%Y")));
    out.push_str(&format!("Tm: {}\n", local.format("%H:%M:%S")));

    out.push_str(&top_border());
    out.push_str(&content_row("Items"));
    out.push_str(&mid_border());
    out.push_str(&content_row(&format!(
        "{:<name$} {:>2} {:>total$}",
        "Name",
        "Qt",
        "Total",
        name = NAME_WIDTH,
        total = INNER_WIDTH - NAME_WIDTH - 4
    )));
    out.push_str(&mid_border());

    if receipt.record.lines.is_empty() {
        out.push_str(&content_row("No Items"));
    } else {
        for line in &receipt.record.lines {
            out.push_str(&content_row(&format!(
                "{:<name$} {:>2} {:>total$}",
                fit(&line.name, NAME_WIDTH),
                line.quantity,
                line.line_total().to_decimal_string(),
                name = NAME_WIDTH,
                total = INNER_WIDTH - NAME_WIDTH - 4
            )));
        }
    }

    out.push_str(&mid_border());
    out.push_str(&content_row(&format!(
        "Tot: Rs. {:>width$}",
        receipt.record.total().to_decimal_string(),
        width = INNER_WIDTH - 9
    )));
    out.push_str(&bottom_border());

    out.push_str("Pay:\n");
    out.push_str(&format!("UPI: {}\n", fit(&upi.payee_id, FIELD_WIDTH)));
    out.push_str(&format!("To: {}\n", fit(&upi.payee_name, FIELD_WIDTH)));
    out.push_str(&format!("Note: {}\n", fit(&upi.note, FIELD_WIDTH)));
    out.push_str(&format!(
        "Link: {}\n",
        payment_uri(upi, receipt.record.total())
    ));

    boxed_title(&mut out, "Thank You!");
    out
}

// =============================================================================
// Formatting Helpers
// =============================================================================

fn top_border() -> String {
    format!("┌{}┐\n", "─".repeat(INNER_WIDTH + 2))
}

fn mid_border() -> String {
    format!("├{}┤\n", "─".repeat(INNER_WIDTH + 2))
}

fn bottom_border() -> String {
    format!("└{}┘\n", "─".repeat(INNER_WIDTH + 2))
}

fn content_row(content: &str) -> String {
    format!("│ {:<width$} │\n", content, width = INNER_WIDTH)
}

fn boxed_title(out: &mut String, title: &str) {
    out.push_str(&top_border());
    out.push_str(&format!("│ {:^width$} │\n", title, width = INNER_WIDTH));
    out.push_str(&bottom_border());
}

/// Truncates to `width` characters, marking the cut with `...`.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SaleLine, SaleRecord};
    use chrono::{TimeZone, Utc};

    fn upi() -> UpiProfile {
        UpiProfile::new("shop@upi", "Kirana Stores", "Groceries")
    }

    fn receipt(customer: Option<CatalogEntry>) -> SaleReceipt {
        SaleReceipt {
            record: SaleRecord {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
                total_paise: 3000,
                lines: vec![SaleLine {
                    code: "A1".to_string(),
                    name: "Tea Dust".to_string(),
                    unit_price_paise: 1000,
                    quantity: 3,
                }],
            },
            customer,
        }
    }

    #[test]
    fn test_invoice_contains_items_and_total() {
        let text = invoice_text(&receipt(None), &upi());
        assert!(text.contains("BILL"));
        assert!(text.contains("Tea Dust"));
        assert!(text.contains("30.00"));
        assert!(text.contains("Dt: 15/03/2024"));
        assert!(text.contains("Link: upi://pay?pa=shop@upi"));
        assert!(text.contains("Thank You!"));
    }

    #[test]
    fn test_customer_block_present_iff_attached() {
        let without = invoice_text(&receipt(None), &upi());
        assert!(!without.contains("Cust:"));

        let customer = CatalogEntry::Customer {
            code: "cust1".to_string(),
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
        };
        let with = invoice_text(&receipt(Some(customer)), &upi());
        assert!(with.contains("Cust: Asha"));
        assert!(with.contains("Ph: 9876543210"));
    }

    #[test]
    fn test_empty_sale_prints_no_items() {
        let mut r = receipt(None);
        r.record.lines.clear();
        r.record.total_paise = 0;
        let text = invoice_text(&r, &upi());
        assert!(text.contains("No Items"));
        assert!(text.contains("0.00"));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut r = receipt(None);
        r.record.lines[0].name = "Extra Long Product Name 1kg".to_string();
        let text = invoice_text(&r, &upi());
        assert!(text.contains("Extra Lon..."));
        assert!(!text.contains("Extra Long Product Name"));
    }

    #[test]
    fn test_fit_helper() {
        assert_eq!(fit("short", 12), "short");
        assert_eq!(fit("exactly12chr", 12), "exactly12chr");
        assert_eq!(fit("much too long for it", 12), "much too ...");
    }
}
