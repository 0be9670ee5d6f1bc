use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::*;

/// Compute subtotal, tax, GST split, discount and grand total.
///
/// Pure function of its inputs. Amounts are accumulated at full precision;
/// nothing is rounded here. Arithmetic saturates at the bounds of
/// [`Decimal`] instead of panicking.
///
/// In [`TaxMode::SplitGst`] the tax is split into equal CGST/SGST halves when
/// both jurisdictions are known and equal. When they differ, or when either
/// one is unknown (empty), the whole tax is reported as IGST.
///
/// ```
/// use quickbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = [
///     LineItem::new("Widget", dec!(2), dec!(10.00)),
///     LineItem::new("Gadget", dec!(1), dec!(5.00)),
/// ];
/// let totals = compute_totals(&items, &TaxConfig::flat(dec!(10)).with_discount(dec!(5)));
/// assert_eq!(totals.subtotal, dec!(25.00));
/// assert_eq!(totals.grand_total, dec!(26.25));
/// ```
pub fn compute_totals(items: &[LineItem], config: &TaxConfig) -> TotalsBreakdown {
    let subtotal = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()));

    let tax_amount = percent_of(subtotal, config.rate);
    let discount_amount = if config.discount_rate > Decimal::ZERO {
        percent_of(subtotal, config.discount_rate)
    } else {
        Decimal::ZERO
    };

    let (cgst, sgst, igst) = match config.mode {
        TaxMode::Flat => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        TaxMode::SplitGst => split_gst(
            tax_amount,
            &config.origin_jurisdiction,
            &config.destination_jurisdiction,
        ),
    };

    let grand_total = subtotal
        .saturating_add(tax_amount)
        .saturating_sub(discount_amount);

    TotalsBreakdown {
        subtotal,
        tax_amount,
        discount_amount,
        cgst,
        sgst,
        igst,
        grand_total,
    }
}

/// Returns `(cgst, sgst, igst)`.
fn split_gst(tax_amount: Decimal, origin: &str, destination: &str) -> (Decimal, Decimal, Decimal) {
    // Unknown jurisdiction falls back to IGST. Known ones compare verbatim.
    if origin.trim().is_empty() || destination.trim().is_empty() || origin != destination {
        return (Decimal::ZERO, Decimal::ZERO, tax_amount);
    }

    let half = tax_amount / dec!(2);
    (half, half, Decimal::ZERO)
}

fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    base.saturating_mul(rate) / dec!(100)
}
