//! Shared primitive types used across the core.

/// A stable customer identifier, as issued by the account system.
pub type CustomerId = String;
