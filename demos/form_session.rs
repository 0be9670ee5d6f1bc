use quickbill::core::*;
use quickbill::preview::{ExportOptions, ExportedPdf, InvoicePreview};
use quickbill::session::*;

fn main() -> Result<(), InvoiceError> {
    let mut session = InvoiceSession::open(MemoryStore::new(), today_utc())?;

    session.business_mut().name = "ACME Ltd".into();
    session.business_mut().address = "12 Main St\nSpringfield".into();
    session.client_mut().name = "Globex".into();

    session.set_item_name(0, "Consulting")?;
    session.set_item_quantity(0, "8")?;
    session.set_item_price(0, "120")?;
    let row = session.add_item();
    session.set_item_name(row, "Travel")?;
    session.set_item_price(row, "85.50")?;

    session.set_currency("EUR")?;
    session.set_tax_rate("19");
    session.set_payment_terms("14");
    session.set_notes("Thank you for your business.");

    for line in session.preview().text_lines() {
        println!("{line}");
    }

    // Blank rows are rejected before anything is exported.
    session.add_item();
    let exporter = |_: &InvoicePreview, _: &ExportOptions| -> Result<ExportedPdf, InvoiceError> {
        Err(InvoiceError::Export("no renderer attached".into()))
    };
    let outcome = session.download_pdf(&exporter);
    println!("[{}] {}", outcome.notification.level.name(), outcome.notification.message);

    Ok(())
}
