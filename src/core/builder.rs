use chrono::NaiveDate;

use super::currencies;
use super::error::InvoiceError;
use super::types::*;

/// Builder for a pre-filled [`InvoiceDraft`].
///
/// ```
/// use quickbill::core::*;
/// use chrono::NaiveDate;
///
/// let draft = DraftBuilder::new("INV-20240305-0001", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
///     .currency("EUR")
///     .business(PartyBuilder::new("ACME Ltd").email("billing@acme.test").build())
///     .client(PartyBuilder::new("Globex").build())
///     .add_item("Consulting", "10", "150")
///     .tax_rate("19")
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.settings.currency_symbol, "€");
/// assert_eq!(draft.items.len(), 1);
/// ```
pub struct DraftBuilder {
    invoice_id: String,
    invoice_date: NaiveDate,
    payment_terms: String,
    currency_code: String,
    tax_mode: TaxMode,
    template: Template,
    tax_rate: String,
    discount_rate: String,
    business: Option<PartyDetails>,
    client: Option<PartyDetails>,
    items: Vec<ItemRow>,
    notes: String,
    terms: String,
    logo: Option<ImageData>,
    signature: Option<ImageData>,
}

impl DraftBuilder {
    pub fn new(invoice_id: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            invoice_date,
            payment_terms: String::new(),
            currency_code: "USD".to_string(),
            tax_mode: TaxMode::Flat,
            template: Template::Classic,
            tax_rate: String::new(),
            discount_rate: String::new(),
            business: None,
            client: None,
            items: Vec::new(),
            notes: String::new(),
            terms: String::new(),
            logo: None,
            signature: None,
        }
    }

    pub fn payment_terms(mut self, days: impl Into<String>) -> Self {
        self.payment_terms = days.into();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn tax_mode(mut self, mode: TaxMode) -> Self {
        self.tax_mode = mode;
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn tax_rate(mut self, rate: impl Into<String>) -> Self {
        self.tax_rate = rate.into();
        self
    }

    pub fn discount_rate(mut self, rate: impl Into<String>) -> Self {
        self.discount_rate = rate.into();
        self
    }

    pub fn business(mut self, party: PartyDetails) -> Self {
        self.business = Some(party);
        self
    }

    pub fn client(mut self, party: PartyDetails) -> Self {
        self.client = Some(party);
        self
    }

    pub fn add_item(
        mut self,
        name: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        self.items.push(ItemRow {
            name: name.into(),
            quantity: quantity.into(),
            price: price.into(),
        });
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = terms.into();
        self
    }

    pub fn logo(mut self, image: ImageData) -> Self {
        self.logo = Some(image);
        self
    }

    pub fn signature(mut self, image: ImageData) -> Self {
        self.signature = Some(image);
        self
    }

    /// Build the draft. Fails on an unknown currency code.
    ///
    /// With no items added the draft gets the single default row the form
    /// always shows.
    pub fn build(self) -> Result<InvoiceDraft, InvoiceError> {
        let symbol = currencies::symbol_for(&self.currency_code)
            .ok_or_else(|| InvoiceError::UnknownCurrency(self.currency_code.clone()))?;

        let mut draft = InvoiceDraft::new(self.invoice_id, self.invoice_date);
        draft.payment_terms = self.payment_terms;
        draft.settings = InvoiceSettings {
            currency_code: self.currency_code,
            currency_symbol: symbol.to_string(),
            tax_mode: self.tax_mode,
            template: self.template,
        };
        draft.tax_rate = self.tax_rate;
        draft.discount_rate = self.discount_rate;
        if let Some(business) = self.business {
            draft.business = business;
        }
        if let Some(client) = self.client {
            draft.client = client;
        }
        if !self.items.is_empty() {
            draft.items = self.items;
        }
        draft.notes = self.notes;
        draft.terms = self.terms;
        draft.logo = self.logo;
        draft.signature = self.signature;

        Ok(draft)
    }
}

/// Builder for [`PartyDetails`].
pub struct PartyBuilder {
    name: String,
    address: String,
    email: String,
    phone: Option<String>,
    gstin: String,
    state: String,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            email: String::new(),
            phone: None,
            gstin: String::new(),
            state: String::new(),
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = gstin.into();
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn build(self) -> PartyDetails {
        PartyDetails {
            name: self.name,
            address: self.address,
            email: self.email,
            phone: self.phone,
            gstin: self.gstin,
            state: self.state,
        }
    }
}
