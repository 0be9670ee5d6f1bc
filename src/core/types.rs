use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single invoice line as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name / description.
    pub name: String,
    /// Invoiced quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity * unit_price`, saturating at the bounds of `Decimal`.
    pub fn line_total(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// How the tax rate is applied to the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxMode {
    /// One aggregate tax on the subtotal.
    #[default]
    Flat,
    /// Goods-and-services tax split into CGST/SGST or IGST depending on
    /// the origin and destination jurisdictions.
    SplitGst,
}

impl TaxMode {
    /// Label of the rate input field for this mode.
    pub fn rate_label(&self) -> &'static str {
        match self {
            Self::Flat => "Tax (%)",
            Self::SplitGst => "GST Rate (%)",
        }
    }
}

/// Tax and discount settings for one totals computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub mode: TaxMode,
    /// Tax rate in percent.
    pub rate: Decimal,
    /// Discount rate in percent.
    pub discount_rate: Decimal,
    /// Seller's state / jurisdiction code. Empty means unknown.
    pub origin_jurisdiction: String,
    /// Buyer's state / jurisdiction code. Empty means unknown.
    pub destination_jurisdiction: String,
}

impl TaxConfig {
    /// Flat tax at `rate` percent, no discount.
    pub fn flat(rate: Decimal) -> Self {
        Self {
            mode: TaxMode::Flat,
            rate,
            ..Self::default()
        }
    }

    /// Split GST at `rate` percent between the two jurisdictions, no discount.
    pub fn split_gst(
        rate: Decimal,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            mode: TaxMode::SplitGst,
            rate,
            discount_rate: Decimal::ZERO,
            origin_jurisdiction: origin.into(),
            destination_jurisdiction: destination.into(),
        }
    }

    pub fn with_discount(mut self, discount_rate: Decimal) -> Self {
        self.discount_rate = discount_rate;
        self
    }
}

/// Result of [`compute_totals`](super::compute_totals).
///
/// Amounts are kept at full precision; round only when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    /// Sum of all line totals.
    pub subtotal: Decimal,
    /// `subtotal * rate / 100`, in either tax mode.
    pub tax_amount: Decimal,
    /// `subtotal * discount_rate / 100`, zero when the rate is not positive.
    pub discount_amount: Decimal,
    /// Central GST share (intra-jurisdiction only).
    pub cgst: Decimal,
    /// State GST share (intra-jurisdiction only).
    pub sgst: Decimal,
    /// Integrated GST (inter-jurisdiction or unknown jurisdiction).
    pub igst: Decimal,
    /// `subtotal + tax_amount - discount_amount`.
    pub grand_total: Decimal,
}

/// Visual template of the rendered invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Minimal => "minimal",
        }
    }

    /// Parse from the template selector value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::Classic),
            "modern" => Some(Self::Modern),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// CSS class applied to the preview container.
    pub fn css_class(&self) -> String {
        format!("invoice-{}", self.name())
    }
}

/// Document-wide display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// ISO 4217 code, e.g. "USD".
    pub currency_code: String,
    /// Symbol prefixed to every amount, e.g. "$".
    pub currency_symbol: String,
    pub tax_mode: TaxMode,
    pub template: Template,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            tax_mode: TaxMode::Flat,
            template: Template::Classic,
        }
    }
}

/// Seller or client details as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDetails {
    pub name: String,
    /// Multi-line postal address.
    pub address: String,
    pub email: String,
    /// Only collected for the business.
    pub phone: Option<String>,
    /// GST identification number (SplitGst mode only).
    pub gstin: String,
    /// State / jurisdiction code used for the GST split.
    pub state: String,
}

/// Raw text of one item row. Parsed into a [`LineItem`] on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl Default for ItemRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: "1".to_string(),
            price: "0".to_string(),
        }
    }
}

impl ItemRow {
    /// Row as it looks after the remove button is pressed on the last row.
    pub fn cleared() -> Self {
        Self {
            name: String::new(),
            quantity: "1".to_string(),
            price: String::new(),
        }
    }

    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            name: self.name.clone(),
            quantity: super::input::parse_number(&self.quantity),
            unit_price: super::input::parse_number(&self.price),
        }
    }
}

/// User-supplied image (logo or signature). The bytes are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// MIME type reported by the file picker, e.g. "image/png".
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

/// The complete state of the invoice form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Human-readable identifier, e.g. "INV-20240305-0001".
    pub invoice_id: String,
    pub invoice_date: NaiveDate,
    /// Payment terms in days, as typed.
    pub payment_terms: String,
    pub settings: InvoiceSettings,
    /// Tax rate in percent, as typed.
    pub tax_rate: String,
    /// Discount rate in percent, as typed.
    pub discount_rate: String,
    pub business: PartyDetails,
    pub client: PartyDetails,
    pub items: Vec<ItemRow>,
    pub notes: String,
    pub terms: String,
    pub logo: Option<ImageData>,
    pub signature: Option<ImageData>,
}

impl InvoiceDraft {
    /// Fresh form: one default item row, business phone field present.
    pub fn new(invoice_id: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            invoice_date,
            payment_terms: String::new(),
            settings: InvoiceSettings::default(),
            tax_rate: String::new(),
            discount_rate: String::new(),
            business: PartyDetails {
                phone: Some(String::new()),
                ..PartyDetails::default()
            },
            client: PartyDetails::default(),
            items: vec![ItemRow::default()],
            notes: String::new(),
            terms: String::new(),
            logo: None,
            signature: None,
        }
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(ItemRow::to_line_item).collect()
    }

    pub fn tax_config(&self) -> TaxConfig {
        TaxConfig {
            mode: self.settings.tax_mode,
            rate: super::input::parse_number(&self.tax_rate),
            discount_rate: super::input::parse_number(&self.discount_rate),
            origin_jurisdiction: self.business.state.clone(),
            destination_jurisdiction: self.client.state.clone(),
        }
    }

    pub fn totals(&self) -> TotalsBreakdown {
        super::totals::compute_totals(&self.line_items(), &self.tax_config())
    }

    pub fn due_date(&self) -> NaiveDate {
        super::dates::compute_due_date(
            self.invoice_date,
            super::input::parse_integer(&self.payment_terms),
        )
    }
}
