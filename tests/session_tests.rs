#![cfg(feature = "session")]

use std::cell::Cell;

use chrono::NaiveDate;
use quickbill::core::*;
use quickbill::preview::*;
use quickbill::session::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open() -> InvoiceSession<MemoryStore> {
    InvoiceSession::open(MemoryStore::new(), date(2024, 3, 5)).unwrap()
}

fn fill_valid(session: &mut InvoiceSession<MemoryStore>) {
    session.set_item_name(0, "Widget").unwrap();
    session.set_item_quantity(0, "2").unwrap();
    session.set_item_price(0, "10").unwrap();
    let i = session.add_item();
    session.set_item_name(i, "Gadget").unwrap();
    session.set_item_price(i, "5").unwrap();
}

/// Exporter that records how often it was called.
struct CountingExporter {
    calls: Cell<usize>,
    fail: bool,
}

impl CountingExporter {
    fn new(fail: bool) -> Self {
        Self {
            calls: Cell::new(0),
            fail,
        }
    }
}

impl PdfExporter for CountingExporter {
    fn export(
        &self,
        _preview: &InvoicePreview,
        options: &ExportOptions,
    ) -> Result<ExportedPdf, InvoiceError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(InvoiceError::Export("canvas tainted".into()));
        }
        Ok(ExportedPdf {
            filename: options.filename.clone(),
            bytes: b"%PDF-1.5".to_vec(),
        })
    }
}

// --- Opening & numbering ---

#[test]
fn open_issues_first_id_and_one_default_row() {
    let session = open();
    assert_eq!(session.invoice_id(), "INV-20240305-0001");
    assert_eq!(session.draft().items, vec![ItemRow::default()]);
    assert_eq!(session.draft().invoice_date, date(2024, 3, 5));
    assert_eq!(session.due_date(), date(2024, 3, 5));
}

#[test]
fn reopening_continues_the_sequence() {
    let session = open();
    let store = session.into_store();
    let session = InvoiceSession::open(store, date(2024, 3, 6)).unwrap();
    assert_eq!(session.invoice_id(), "INV-20240306-0002");
}

#[test]
fn new_invoice_resets_form_and_advances_id() {
    let mut session = open();
    fill_valid(&mut session);
    session.set_currency("EUR").unwrap();
    session.set_tax_mode(TaxMode::SplitGst);
    session.set_notes("Thanks");
    session.business_mut().name = "ACME".into();

    session.new_invoice(date(2024, 3, 7)).unwrap();

    assert_eq!(session.invoice_id(), "INV-20240307-0002");
    let draft = session.draft();
    assert_eq!(draft.items, vec![ItemRow::default()]);
    assert_eq!(draft.settings, InvoiceSettings::default());
    assert!(draft.notes.is_empty());
    assert!(draft.business.name.is_empty());
    assert_eq!(session.preview().business.name, "Your Business");
}

#[test]
fn manual_id_override_does_not_touch_counter() {
    let mut session = open();
    session.set_invoice_id("CUSTOM-7");
    assert_eq!(session.preview().invoice_id, "CUSTOM-7");
    session.new_invoice(date(2024, 3, 5)).unwrap();
    assert_eq!(session.invoice_id(), "INV-20240305-0002");
}

// --- Items ---

#[test]
fn totals_follow_edits() {
    let mut session = open();
    fill_valid(&mut session);
    session.set_tax_rate("10");
    session.set_discount_rate("5");

    let totals = session.totals();
    assert_eq!(totals.subtotal, dec!(25));
    assert_eq!(totals.grand_total, dec!(26.25));

    session.set_item_quantity(0, "3").unwrap();
    assert_eq!(session.totals().subtotal, dec!(35));
}

#[test]
fn removing_last_row_clears_it() {
    let mut session = open();
    session.set_item_name(0, "Widget").unwrap();
    session.set_item_quantity(0, "4").unwrap();
    session.remove_item(0).unwrap();

    assert_eq!(session.draft().items, vec![ItemRow::cleared()]);
    assert_eq!(session.line_items()[0].quantity, dec!(1));
}

#[test]
fn removing_keeps_order_of_remaining_rows() {
    let mut session = open();
    fill_valid(&mut session);
    let i = session.add_item();
    session.set_item_name(i, "Bolt").unwrap();

    session.remove_item(1).unwrap();
    let names: Vec<String> = session.line_items().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Widget", "Bolt"]);
}

#[test]
fn out_of_range_row_is_an_error() {
    let mut session = open();
    assert!(session.set_item_name(5, "x").is_err());
    assert!(session.remove_item(1).is_err());
}

// --- Settings ---

#[test]
fn currency_switch_changes_symbol() {
    let mut session = open();
    fill_valid(&mut session);
    session.set_currency("GBP").unwrap();
    assert_eq!(session.preview().summary.subtotal, "£25.00");

    let err = session.set_currency("ABC").unwrap_err();
    assert!(matches!(err, InvoiceError::UnknownCurrency(_)));
    assert_eq!(session.draft().settings.currency_code, "GBP");
}

#[test]
fn split_gst_uses_party_states() {
    let mut session = open();
    fill_valid(&mut session);
    session.set_tax_mode(TaxMode::SplitGst);
    session.set_tax_rate("18");
    session.business_mut().state = "KA".into();
    session.client_mut().state = "KA".into();

    let config = session.tax_config();
    assert_eq!(config.origin_jurisdiction, "KA");
    let totals = session.totals();
    assert_eq!(totals.cgst, dec!(2.25));
    assert_eq!(totals.sgst, dec!(2.25));

    session.client_mut().state = "TN".into();
    assert_eq!(session.totals().igst, dec!(4.50));
}

#[test]
fn state_setters_choose_the_gst_split() {
    let mut session = open();
    fill_valid(&mut session);
    session.set_tax_mode(TaxMode::SplitGst);
    session.set_tax_rate("18");

    session.set_business_state("MH");
    session.set_client_state("MH");
    assert_eq!(session.draft().business.state, "MH");
    assert_eq!(session.tax_config().destination_jurisdiction, "MH");
    assert_eq!(session.totals().cgst, dec!(2.25));

    session.set_client_state("");
    let totals = session.totals();
    assert_eq!(totals.igst, dec!(4.50));
    assert_eq!(totals.cgst, dec!(0));
}

#[test]
fn payment_terms_drive_due_date() {
    let mut session = open();
    session.set_invoice_date(date(2024, 1, 28));
    session.set_payment_terms("5");
    assert_eq!(session.due_date(), date(2024, 2, 2));
    assert_eq!(session.preview().due_date, "Feb 2, 2024");

    session.set_payment_terms("");
    assert_eq!(session.due_date(), date(2024, 1, 28));
}

// --- Export ---

#[test]
fn download_blocked_by_validation() {
    let session = open();
    let exporter = CountingExporter::new(false);

    let outcome = session.download_pdf(&exporter);
    assert_eq!(outcome.notification.level, NotificationLevel::Danger);
    assert_eq!(outcome.notification.message, "All items must have a description.");
    assert!(outcome.pdf.is_none());
    assert_eq!(exporter.calls.get(), 0);
}

#[test]
fn download_blocked_by_zero_price() {
    let mut session = open();
    session.set_item_name(0, "Widget").unwrap();
    let outcome = session.download_pdf(&CountingExporter::new(false));
    assert_eq!(outcome.notification.message, "Items cannot have a price of zero.");
}

#[test]
fn download_success() {
    let mut session = open();
    fill_valid(&mut session);
    let exporter = CountingExporter::new(false);

    let outcome = session.download_pdf(&exporter);
    assert_eq!(outcome.notification.level, NotificationLevel::Success);
    assert_eq!(outcome.notification.message, EXPORT_SUCCESS_MESSAGE);
    assert_eq!(outcome.notification.ttl, NOTIFICATION_TTL);
    assert_eq!(outcome.pdf.unwrap().filename, "INV-20240305-0001.pdf");
    assert_eq!(exporter.calls.get(), 1);
}

#[test]
fn download_failure_can_be_retried() {
    let mut session = open();
    fill_valid(&mut session);

    let failing = CountingExporter::new(true);
    let outcome = session.download_pdf(&failing);
    assert_eq!(outcome.notification.level, NotificationLevel::Danger);
    assert_eq!(outcome.notification.message, EXPORT_FAILURE_MESSAGE);
    assert!(outcome.pdf.is_none());

    let outcome = session.download_pdf(&CountingExporter::new(false));
    assert!(outcome.pdf.is_some());
}

#[test]
fn closures_work_as_exporters() {
    let mut session = open();
    fill_valid(&mut session);
    let exporter = |preview: &InvoicePreview, options: &ExportOptions| {
        Ok::<_, InvoiceError>(ExportedPdf {
            filename: options.filename.clone(),
            bytes: preview.text_lines().join("\n").into_bytes(),
        })
    };
    let pdf = session.download_pdf(&exporter).pdf.unwrap();
    assert!(String::from_utf8(pdf.bytes).unwrap().contains("Widget | 2 | $10.00 | $20.00"));
}

#[test]
fn session_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counter.json");

    let session = InvoiceSession::open(JsonFileStore::new(&path), date(2024, 3, 5)).unwrap();
    assert_eq!(session.invoice_id(), "INV-20240305-0001");
    drop(session);

    let session = InvoiceSession::open(JsonFileStore::new(&path), date(2024, 3, 5)).unwrap();
    assert_eq!(session.invoice_id(), "INV-20240305-0002");

    let raw = std::fs::read_to_string(&path).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[LAST_INVOICE_NUMBER_KEY], "2");
}
