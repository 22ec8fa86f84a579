//! Business logic services
//!
//! The scoring core (rules, engine, cancellation) and the receipt service
//! that sequences validation, scoring and storage.

pub mod cancel;
pub mod points_service;
pub mod receipt_service;
pub mod rules;
