//! Form session: one method per user action on the invoice form.
//!
//! The session owns the [`InvoiceDraft`] and the persisted sequence counter.
//! Callers (a UI layer, a test) invoke the methods explicitly and re-read
//! [`InvoiceSession::preview`] afterwards; there is no event dispatch.

mod notification;
mod store;

pub use notification::*;
pub use store::*;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::core::*;
use crate::preview::{ExportOptions, ExportedPdf, InvoicePreview, PdfExporter};

/// Shown after a successful export.
pub const EXPORT_SUCCESS_MESSAGE: &str = "Invoice downloaded successfully!";
/// Shown after the exporter failed.
pub const EXPORT_FAILURE_MESSAGE: &str = "Error generating PDF. Please try again.";

/// Result of pressing the download button.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub notification: Notification,
    /// The exported file, present only on success.
    pub pdf: Option<ExportedPdf>,
}

/// Editing session for one invoice at a time.
#[derive(Debug)]
pub struct InvoiceSession<S> {
    counter: SequenceCounter<S>,
    draft: InvoiceDraft,
}

impl<S: KeyValueStore> InvoiceSession<S> {
    /// Start a session with a blank draft dated `today`.
    ///
    /// Opening the form issues a fresh invoice id, so it consumes one
    /// sequence number.
    pub fn open(store: S, today: NaiveDate) -> Result<Self, InvoiceError> {
        let mut counter = SequenceCounter::new(store);
        let id = counter.advance(today)?;
        Ok(Self {
            counter,
            draft: InvoiceDraft::new(id, today),
        })
    }

    /// Discard the current draft and start over with a new invoice id.
    pub fn new_invoice(&mut self, today: NaiveDate) -> Result<(), InvoiceError> {
        let id = self.counter.advance(today)?;
        self.draft = InvoiceDraft::new(id, today);
        info!(invoice_id = %self.draft.invoice_id, "started new invoice");
        Ok(())
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn invoice_id(&self) -> &str {
        &self.draft.invoice_id
    }

    /// Override the generated id. The counter is not touched.
    pub fn set_invoice_id(&mut self, id: impl Into<String>) {
        self.draft.invoice_id = id.into();
    }

    // --- Items ---

    /// Append a default row (quantity 1, price 0) and return its index.
    pub fn add_item(&mut self) -> usize {
        self.draft.items.push(ItemRow::default());
        self.draft.items.len() - 1
    }

    pub fn set_item_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), InvoiceError> {
        self.item_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn set_item_quantity(
        &mut self,
        index: usize,
        quantity: impl Into<String>,
    ) -> Result<(), InvoiceError> {
        self.item_mut(index)?.quantity = quantity.into();
        Ok(())
    }

    pub fn set_item_price(&mut self, index: usize, price: impl Into<String>) -> Result<(), InvoiceError> {
        self.item_mut(index)?.price = price.into();
        Ok(())
    }

    /// Remove a row. The last remaining row is cleared instead of removed.
    pub fn remove_item(&mut self, index: usize) -> Result<(), InvoiceError> {
        self.item_mut(index)?;
        if self.draft.items.len() > 1 {
            self.draft.items.remove(index);
        } else {
            self.draft.items[index] = ItemRow::cleared();
        }
        Ok(())
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ItemRow, InvoiceError> {
        let len = self.draft.items.len();
        self.draft
            .items
            .get_mut(index)
            .ok_or_else(|| InvoiceError::Builder(format!("no item row {index} (have {len})")))
    }

    // --- Settings ---

    pub fn set_currency(&mut self, code: &str) -> Result<(), InvoiceError> {
        let symbol =
            symbol_for(code).ok_or_else(|| InvoiceError::UnknownCurrency(code.to_string()))?;
        self.draft.settings.currency_code = code.to_string();
        self.draft.settings.currency_symbol = symbol.to_string();
        Ok(())
    }

    pub fn set_tax_mode(&mut self, mode: TaxMode) {
        self.draft.settings.tax_mode = mode;
    }

    pub fn set_template(&mut self, template: Template) {
        self.draft.settings.template = template;
    }

    pub fn set_tax_rate(&mut self, rate: impl Into<String>) {
        self.draft.tax_rate = rate.into();
    }

    pub fn set_discount_rate(&mut self, rate: impl Into<String>) {
        self.draft.discount_rate = rate.into();
    }

    // --- Jurisdictions ---

    /// Seller's state, the origin jurisdiction of the GST split.
    pub fn set_business_state(&mut self, state: impl Into<String>) {
        self.draft.business.state = state.into();
    }

    /// Client's state, the destination jurisdiction of the GST split.
    pub fn set_client_state(&mut self, state: impl Into<String>) {
        self.draft.client.state = state.into();
    }

    // --- Parties, notes, media ---

    pub fn business_mut(&mut self) -> &mut PartyDetails {
        &mut self.draft.business
    }

    pub fn client_mut(&mut self) -> &mut PartyDetails {
        &mut self.draft.client
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    pub fn set_terms(&mut self, terms: impl Into<String>) {
        self.draft.terms = terms.into();
    }

    pub fn set_logo(&mut self, image: Option<ImageData>) {
        self.draft.logo = image;
    }

    pub fn set_signature(&mut self, image: Option<ImageData>) {
        self.draft.signature = image;
    }

    // --- Dates ---

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.draft.invoice_date = date;
    }

    pub fn set_payment_terms(&mut self, days: impl Into<String>) {
        self.draft.payment_terms = days.into();
    }

    pub fn due_date(&self) -> NaiveDate {
        self.draft.due_date()
    }

    // --- Derived views ---

    pub fn line_items(&self) -> Vec<LineItem> {
        self.draft.line_items()
    }

    pub fn tax_config(&self) -> TaxConfig {
        self.draft.tax_config()
    }

    pub fn totals(&self) -> TotalsBreakdown {
        self.draft.totals()
    }

    pub fn preview(&self) -> InvoicePreview {
        InvoicePreview::render(&self.draft)
    }

    // --- Export ---

    /// Validate the items and, if they pass, export the preview as a PDF.
    ///
    /// Never fails: every outcome is reported as a notification so the
    /// user can keep editing and press the button again.
    pub fn download_pdf(&self, exporter: &impl PdfExporter) -> DownloadOutcome {
        if let Err(rejection) = validate_items(&self.line_items()) {
            warn!(invoice_id = %self.draft.invoice_id, %rejection, "export blocked by validation");
            return DownloadOutcome {
                notification: Notification::danger(rejection.to_string()),
                pdf: None,
            };
        }

        let options = ExportOptions::for_invoice(&self.draft.invoice_id);
        match exporter.export(&self.preview(), &options) {
            Ok(pdf) => {
                info!(filename = %pdf.filename, bytes = pdf.bytes.len(), "invoice exported");
                DownloadOutcome {
                    notification: Notification::success(EXPORT_SUCCESS_MESSAGE),
                    pdf: Some(pdf),
                }
            }
            Err(e) => {
                error!(filename = %options.filename, error = %e, "PDF export failed");
                DownloadOutcome {
                    notification: Notification::danger(EXPORT_FAILURE_MESSAGE),
                    pdf: None,
                }
            }
        }
    }

    pub fn into_store(self) -> S {
        self.counter.into_store()
    }
}
