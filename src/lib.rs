//! # ERV Models
//!
//! Energy recovery ventilator (ERV) performance and supply fan selection
//! models for [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given outdoor and return design conditions, airflows, and an ERV wheel
//! size, the calculator reproduces the selection tool's engineering chain:
//! altitude correction, psychrometric properties, wheel outlet conditions,
//! recovered capacity, fan and motor selection, and the packaged unit's
//! adjusted rating.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations,
//!   starting with [`models::hvac::erv::ErvCalculator`].
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful across models or outside this crate.
//! Only utilities in [`support`] are part of the public API.

pub mod models;
pub mod support;
