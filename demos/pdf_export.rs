use std::path::Path;

use quickbill::core::*;
use quickbill::pdf::VectorPdfExporter;
use quickbill::session::*;

fn main() -> Result<(), InvoiceError> {
    let store = JsonFileStore::new("quickbill-store.json");
    let mut session = InvoiceSession::open(store, today_utc())?;

    session.business_mut().name = "ACME Ltd".into();
    session.client_mut().name = "Globex".into();
    session.set_item_name(0, "Widget")?;
    session.set_item_quantity(0, "2")?;
    session.set_item_price(0, "10")?;
    session.set_tax_rate("10");
    session.set_discount_rate("5");

    let outcome = session.download_pdf(&VectorPdfExporter::new());
    println!("{}", outcome.notification.message);
    if let Some(pdf) = outcome.pdf {
        let path = pdf.write_to_dir(Path::new("."))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
