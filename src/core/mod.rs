//! Core invoice types, totals, validation, numbering and due dates.
//!
//! Everything here is pure: no I/O, no clock (except [`today_utc`]), no
//! logging. Raw form text enters through [`input`] and is coerced before it
//! reaches the calculators.

mod builder;
mod currencies;
mod dates;
mod error;
pub mod input;
mod numbering;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use currencies::*;
pub use dates::*;
pub use error::*;
pub use input::{parse_integer, parse_number, parse_sequence};
pub use numbering::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
