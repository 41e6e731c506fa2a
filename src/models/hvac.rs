//! HVAC equipment models.
//!
//! This module contains models for air-handling equipment, starting with
//! energy recovery ventilator (ERV) performance and fan selection.

pub mod erv;
