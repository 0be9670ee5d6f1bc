//! Currency symbols and amount formatting.
//!
//! The only localization the invoice form does is substituting the currency
//! symbol in front of amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Check whether `code` is a currency code the form offers.
pub fn is_known_currency_code(code: &str) -> bool {
    symbol_for(code).is_some()
}

/// Display symbol for an ISO 4217 currency code.
pub fn symbol_for(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| CURRENCY_SYMBOLS[i].1)
}

/// Format an amount as `<symbol><amount>` with exactly two decimals.
///
/// This is the single place amounts are rounded (half away from zero).
///
/// ```
/// use quickbill::core::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency("$", dec!(26.25)), "$26.25");
/// assert_eq!(format_currency("€", dec!(0.005)), "€0.01");
/// assert_eq!(format_currency("$", dec!(-5)), "$-5.00");
/// ```
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{:.2}", round_for_display(amount))
}

/// Round to two decimals and fix the scale so `Display` always prints both.
///
/// Magnitudes near the saturation bound (above `Decimal::MAX / 100`) cannot
/// carry scale 2 and keep a smaller scale; [`format_currency`] still pads them.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// ISO 4217 code to display symbol. Sorted by code for binary search.
static CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("AED", "د.إ"),
    ("AUD", "A$"),
    ("BRL", "R$"),
    ("CAD", "C$"),
    ("CHF", "CHF "),
    ("CNY", "¥"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("HKD", "HK$"),
    ("IDR", "Rp"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("MXN", "MX$"),
    ("MYR", "RM"),
    ("NGN", "₦"),
    ("NZD", "NZ$"),
    ("PHP", "₱"),
    ("PKR", "₨"),
    ("SAR", "﷼"),
    ("SEK", "kr"),
    ("SGD", "S$"),
    ("THB", "฿"),
    ("TRY", "₺"),
    ("USD", "$"),
    ("ZAR", "R"),
];
