//! Record builders and order-insensitive assertions, following ironbeam's
//! `testing` module: exported so both this crate's own suite and downstream
//! consumers can write expectations without re-deriving sort/compare logic.

mod assertions;
mod builders;

pub use assertions::{assert_records_eq_unordered, assert_records_eq_ordered};
pub use builders::rows;
