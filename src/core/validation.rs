use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::LineItem;

/// Check that the items are fit for export.
///
/// Returns the first violation in list order; per item the description is
/// checked before the price.
pub fn validate_items(items: &[LineItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyInvoice);
    }

    for (index, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(ValidationError::MissingDescription { index });
        }
        if item.unit_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice { index });
        }
    }

    Ok(())
}
