// src/ui/mod.rs
//
// Interactive state of the companion pages. Everything here is a pure
// reducer or a pure function of the URL; I/O is left to the caller.
pub mod delete_control;
pub mod filter_control;
pub mod menu;
pub mod url_query;

pub use delete_control::{DeleteControl, DeleteControlView, DeleteEffect, DeleteEvent, DeleteState};
pub use filter_control::{canonical_query, FilterControl, FilterIntent, FilterKind};
pub use menu::{MenuEffect, NavItem, NavMenu, NAV_ITEMS};
