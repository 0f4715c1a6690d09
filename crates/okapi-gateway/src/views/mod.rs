//! HTML views served outside the method namespace.

pub mod not_found;
