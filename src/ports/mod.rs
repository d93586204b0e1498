// src/ports/mod.rs
pub mod html;
pub mod library;

pub use html::HtmlPresenter;
pub use library::{LibraryPage, LibraryState};
