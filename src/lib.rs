//! # quickbill
//!
//! Engine behind a single-page invoice form: line items, tax and GST split,
//! discount, invoice numbering, due dates, a live preview model and PDF export.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are rounded only
//! when formatted for display.
//!
//! ## Quick Start
//!
//! ```rust
//! use quickbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItem::new("Widget", dec!(2), dec!(10.00)),
//!     LineItem::new("Gadget", dec!(1), dec!(5.00)),
//! ];
//! assert!(validate_items(&items).is_ok());
//!
//! let totals = compute_totals(&items, &TaxConfig::split_gst(dec!(18), "KA", "KA"));
//! assert_eq!(totals.cgst, dec!(2.25));
//! assert_eq!(totals.sgst, dec!(2.25));
//! assert_eq!(format_currency("₹", totals.grand_total), "₹29.50");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals, validation, numbering, due dates, input coercion |
//! | `preview` (default) | Preview view model, exporter trait and options |
//! | `session` (default) | Counter store and the form session |
//! | `pdf` | lopdf-backed vector PDF exporter |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "preview")]
pub mod preview;

#[cfg(feature = "session")]
pub mod session;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
