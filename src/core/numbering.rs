use chrono::NaiveDate;

/// Prefix of every generated invoice identifier.
pub const INVOICE_ID_PREFIX: &str = "INV-";

/// Minimum width of the sequence suffix. Longer sequences widen it.
pub const SEQUENCE_PAD: usize = 4;

/// Derive the next invoice identifier from the last issued sequence number.
///
/// Returns the identifier `INV-<YYYYMMDD>-<seq>` and the new sequence number,
/// which the caller must persist for the next call.
///
/// ```
/// use chrono::NaiveDate;
/// use quickbill::core::next_invoice_id;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(next_invoice_id(date, None), ("INV-20240305-0001".to_string(), 1));
/// assert_eq!(next_invoice_id(date, Some(1)).0, "INV-20240305-0002");
/// ```
pub fn next_invoice_id(current_date: NaiveDate, last_sequence: Option<u64>) -> (String, u64) {
    let sequence = last_sequence.map_or(1, |last| last.saturating_add(1));
    (format_invoice_id(current_date, sequence), sequence)
}

/// Format an identifier for an already-known sequence number.
pub fn format_invoice_id(date: NaiveDate, sequence: u64) -> String {
    format!(
        "{INVOICE_ID_PREFIX}{}-{:0>width$}",
        date.format("%Y%m%d"),
        sequence,
        width = SEQUENCE_PAD
    )
}
