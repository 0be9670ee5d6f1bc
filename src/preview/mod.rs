//! View model of the rendered invoice.
//!
//! [`InvoicePreview::render`] re-derives everything the presentation layer
//! shows from an [`InvoiceDraft`]: formatted amounts, which optional summary
//! rows are visible, party detail lines and display dates. The presentation
//! layer calls it after every edit; nothing is cached between calls.

mod export;

pub use export::*;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::*;

/// Placeholder shown while the business name is empty.
pub const BUSINESS_NAME_PLACEHOLDER: &str = "Your Business";
/// Placeholder shown while the client name is empty.
pub const CLIENT_NAME_PLACEHOLDER: &str = "Client Name";
/// Name shown for item rows with a blank name but a positive total.
pub const UNNAMED_ITEM: &str = "Item";

/// Everything the rendered invoice displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicePreview {
    /// CSS class of the preview container, e.g. "invoice-modern".
    pub template_class: String,
    /// Logo as an inline `data:` URL.
    pub logo: Option<String>,
    /// Signature as an inline `data:` URL.
    pub signature: Option<String>,
    pub invoice_id: String,
    pub business: PartyPreview,
    pub client: PartyPreview,
    pub invoice_date: String,
    pub due_date: String,
    pub rows: Vec<PreviewRow>,
    pub summary: SummaryPreview,
    /// Notes section, `None` when hidden.
    pub notes: Option<String>,
    /// Terms section, `None` when hidden.
    pub terms: Option<String>,
    /// Label of the rate input for the current tax mode.
    pub tax_rate_label: &'static str,
}

/// Name block of the seller or the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyPreview {
    pub name: String,
    /// Address lines, then email, then phone. Empty parts are skipped.
    pub details: Vec<String>,
    /// "GSTIN: ..." line, only in split GST mode.
    pub gstin: Option<String>,
}

/// One rendered item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

/// A summary row showing a percentage and the resulting amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatedAmount {
    pub rate: String,
    pub amount: String,
}

/// Totals block. `None` rows are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPreview {
    pub subtotal: String,
    /// Flat tax row.
    pub tax: Option<RatedAmount>,
    pub cgst: Option<RatedAmount>,
    pub sgst: Option<RatedAmount>,
    pub igst: Option<RatedAmount>,
    /// Discount row; the amount carries a leading minus.
    pub discount: Option<RatedAmount>,
    pub grand_total: String,
}

impl InvoicePreview {
    pub fn render(draft: &InvoiceDraft) -> Self {
        let settings = &draft.settings;
        let split_gst = settings.tax_mode == TaxMode::SplitGst;

        let rows = draft
            .line_items()
            .iter()
            .filter_map(|item| render_row(item, &settings.currency_symbol))
            .collect();

        Self {
            template_class: settings.template.css_class(),
            logo: draft.logo.as_ref().map(data_url),
            signature: draft.signature.as_ref().map(data_url),
            invoice_id: draft.invoice_id.clone(),
            business: render_party(&draft.business, BUSINESS_NAME_PLACEHOLDER, split_gst),
            client: render_party(&draft.client, CLIENT_NAME_PLACEHOLDER, split_gst),
            invoice_date: format_display_date(draft.invoice_date),
            due_date: format_display_date(draft.due_date()),
            rows,
            summary: render_summary(draft),
            notes: visible_section(&draft.notes),
            terms: visible_section(&draft.terms),
            tax_rate_label: settings.tax_mode.rate_label(),
        }
    }

    /// Whether the combined notes/terms container is shown.
    pub fn notes_terms_visible(&self) -> bool {
        self.notes.is_some() || self.terms.is_some()
    }

    /// Flatten the preview into printable lines, top to bottom.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "INVOICE".to_string(),
            self.invoice_id.clone(),
            format!("Date: {}", self.invoice_date),
            format!("Due: {}", self.due_date),
            String::new(),
        ];

        push_party(&mut lines, "From", &self.business);
        push_party(&mut lines, "Bill To", &self.client);
        lines.push(String::new());

        lines.push("Item | Qty | Price | Total".to_string());
        for row in &self.rows {
            lines.push(format!(
                "{} | {} | {} | {}",
                row.name, row.quantity, row.unit_price, row.total
            ));
        }
        lines.push(String::new());

        let summary = &self.summary;
        lines.push(format!("Subtotal: {}", summary.subtotal));
        let rated = [
            ("Tax", &summary.tax),
            ("CGST", &summary.cgst),
            ("SGST", &summary.sgst),
            ("IGST", &summary.igst),
            ("Discount", &summary.discount),
        ];
        for (label, row) in rated {
            if let Some(row) = row {
                lines.push(format!("{label} ({}%): {}", row.rate, row.amount));
            }
        }
        lines.push(format!("Total: {}", summary.grand_total));

        if let Some(notes) = &self.notes {
            lines.push(String::new());
            lines.push("Notes:".to_string());
            lines.extend(notes.lines().map(str::to_string));
        }
        if let Some(terms) = &self.terms {
            lines.push(String::new());
            lines.push("Terms & Conditions:".to_string());
            lines.extend(terms.lines().map(str::to_string));
        }

        lines
    }
}

fn push_party(lines: &mut Vec<String>, label: &str, party: &PartyPreview) {
    lines.push(format!("{label}: {}", party.name));
    lines.extend(party.details.iter().map(|d| format!("  {d}")));
    if let Some(gstin) = &party.gstin {
        lines.push(format!("  {gstin}"));
    }
}

fn render_row(item: &LineItem, symbol: &str) -> Option<PreviewRow> {
    let total = item.line_total();
    if item.name.is_empty() && total <= Decimal::ZERO {
        return None;
    }
    let name = if item.name.is_empty() {
        UNNAMED_ITEM.to_string()
    } else {
        item.name.clone()
    };
    Some(PreviewRow {
        name,
        quantity: item.quantity.normalize().to_string(),
        unit_price: format_currency(symbol, item.unit_price),
        total: format_currency(symbol, total),
    })
}

fn render_party(party: &PartyDetails, placeholder: &str, split_gst: bool) -> PartyPreview {
    let name = if party.name.trim().is_empty() {
        placeholder.to_string()
    } else {
        party.name.clone()
    };

    let mut details: Vec<String> = party.address.lines().map(str::to_string).collect();
    if !party.email.is_empty() {
        details.push(party.email.clone());
    }
    if let Some(phone) = party.phone.as_ref().filter(|p| !p.is_empty()) {
        details.push(phone.clone());
    }

    let gstin = (split_gst && !party.gstin.is_empty()).then(|| format!("GSTIN: {}", party.gstin));

    PartyPreview {
        name,
        details,
        gstin,
    }
}

fn render_summary(draft: &InvoiceDraft) -> SummaryPreview {
    let config = draft.tax_config();
    let totals = compute_totals(&draft.line_items(), &config);
    let symbol = draft.settings.currency_symbol.as_str();
    let money = |amount: Decimal| format_currency(symbol, amount);

    let taxed = config.rate > Decimal::ZERO;
    let flat = config.mode == TaxMode::Flat;
    let rate = display_rate(config.rate);
    let half_rate = display_rate(config.rate / dec!(2));

    let gst_row = |share: Decimal, rate: &str| {
        (!flat && taxed && share > Decimal::ZERO).then(|| RatedAmount {
            rate: rate.to_string(),
            amount: money(share),
        })
    };

    SummaryPreview {
        subtotal: money(totals.subtotal),
        tax: (flat && taxed).then(|| RatedAmount {
            rate: rate.clone(),
            amount: money(totals.tax_amount),
        }),
        cgst: gst_row(totals.cgst, &half_rate),
        sgst: gst_row(totals.sgst, &half_rate),
        igst: gst_row(totals.igst, &rate),
        discount: (config.discount_rate > Decimal::ZERO).then(|| RatedAmount {
            rate: display_rate(config.discount_rate),
            amount: format!("-{}", money(totals.discount_amount)),
        }),
        grand_total: money(totals.grand_total),
    }
}

fn display_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}

fn visible_section(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

/// Inline `data:` URL for an uploaded image.
pub fn data_url(image: &ImageData) -> String {
    let mime = if image.mime.is_empty() {
        "application/octet-stream"
    } else {
        image.mime.as_str()
    };
    format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> InvoiceDraft {
        DraftBuilder::new("INV-20240305-0001", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .add_item("Widget", "2", "10")
            .add_item("Gadget", "1", "5")
            .build()
            .unwrap()
    }

    #[test]
    fn blank_rows_are_skipped() {
        let mut d = draft();
        d.items.push(ItemRow::default());
        let preview = InvoicePreview::render(&d);
        assert_eq!(preview.rows.len(), 2);
    }

    #[test]
    fn unnamed_row_with_total_is_shown_as_item() {
        let mut d = draft();
        d.items.push(ItemRow {
            name: String::new(),
            quantity: "3".into(),
            price: "1.5".into(),
        });
        let preview = InvoicePreview::render(&d);
        let row = preview.rows.last().unwrap();
        assert_eq!(row.name, "Item");
        assert_eq!(row.quantity, "3");
        assert_eq!(row.unit_price, "$1.50");
        assert_eq!(row.total, "$4.50");
    }

    #[test]
    fn no_optional_rows_without_rates() {
        let preview = InvoicePreview::render(&draft());
        let summary = &preview.summary;
        assert_eq!(summary.subtotal, "$25.00");
        assert!(summary.tax.is_none());
        assert!(summary.cgst.is_none());
        assert!(summary.sgst.is_none());
        assert!(summary.igst.is_none());
        assert!(summary.discount.is_none());
        assert_eq!(summary.grand_total, "$25.00");
    }

    #[test]
    fn placeholders_for_empty_names() {
        let preview = InvoicePreview::render(&draft());
        assert_eq!(preview.business.name, "Your Business");
        assert_eq!(preview.client.name, "Client Name");
    }

    #[test]
    fn data_url_encoding() {
        let image = ImageData::new("image/png", b"abc".to_vec());
        assert_eq!(data_url(&image), "data:image/png;base64,YWJj");
        let unknown = ImageData::new("", Vec::new());
        assert_eq!(data_url(&unknown), "data:application/octet-stream;base64,");
    }

    #[test]
    fn notes_visibility() {
        let mut d = draft();
        d.notes = "   ".into();
        let preview = InvoicePreview::render(&d);
        assert!(preview.notes.is_none());
        assert!(!preview.notes_terms_visible());

        d.terms = "Net 30".into();
        let preview = InvoicePreview::render(&d);
        assert_eq!(preview.terms.as_deref(), Some("Net 30"));
        assert!(preview.notes_terms_visible());
    }
}
