#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use quickbill::preview::InvoicePreview;

fuzz_target!(|rows: Vec<(String, String, String)>| {
    let Some(date) = NaiveDate::from_ymd_opt(2024, 3, 5) else {
        return;
    };
    let mut builder = quickbill::DraftBuilder::new("INV-FUZZ", date)
        .tax_mode(quickbill::TaxMode::SplitGst)
        .tax_rate("18")
        .discount_rate("5");
    for (name, qty, price) in rows {
        builder = builder.add_item(name, qty, price);
    }
    if let Ok(draft) = builder.build() {
        // Totals, validation and rendering must not panic on any input.
        let _ = draft.totals();
        let _ = quickbill::validate_items(&draft.line_items());
        let _ = InvoicePreview::render(&draft).text_lines();
    }
});
