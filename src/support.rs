//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own (for
//! example, evaluating a single psychrometric property), but their APIs are
//! not stable.

pub mod atmosphere;
pub mod constraint;
pub mod forecast;
pub mod psychrometrics;
