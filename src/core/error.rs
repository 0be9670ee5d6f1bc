use thiserror::Error;

/// Errors that can occur while editing, numbering or exporting an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// The line items are not fit for export.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// The counter store could not be read or written.
    #[error("store error: {0}")]
    Store(String),

    /// The PDF exporter reported a failure.
    #[error("export failed: {0}")]
    Export(String),

    /// Currency code not present in the symbol table.
    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),
}

/// Reason a set of line items was rejected for export.
///
/// Only the first violation found is reported. Items are scanned in order
/// and, per item, the description is checked before the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The invoice has no line items at all.
    #[error("Please add at least one item to the invoice.")]
    EmptyInvoice,

    /// The item at `index` has a blank name.
    #[error("All items must have a description.")]
    MissingDescription { index: usize },

    /// The item at `index` has a unit price of zero or less.
    #[error("Items cannot have a price of zero.")]
    NonPositivePrice { index: usize },
}

impl ValidationError {
    /// Zero-based position of the offending item, if the error is item-specific.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::EmptyInvoice => None,
            Self::MissingDescription { index } | Self::NonPositivePrice { index } => Some(*index),
        }
    }
}
