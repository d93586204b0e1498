// src/domain/mod.rs
pub mod companion;
pub mod error;
pub mod filter;

pub use companion::{Companion, Subject};
pub use error::DomainError;
pub use filter::CompanionFilter;
