// src/application/mod.rs
pub mod companion_deleter;
pub mod companion_lister;
pub mod repository;

pub use companion_deleter::{CompanionDeleter, DeleteConfirmation};
pub use companion_lister::CompanionLister;
pub use repository::{CompanionRepository, CompanionStore};
