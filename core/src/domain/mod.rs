//! Domain entities for token management.

pub mod entities;
