//! Adapters that turn external inputs into domain values.

pub mod csv;
