//! Business logic that spans repositories.

pub mod checkout;
