// src/infrastructure/mod.rs
pub mod auth;
pub mod config;
pub mod renderer;
pub mod server;
pub mod session;
pub mod supabase;

pub use auth::{AccessTokenProvider, AuthError, EnvTokenProvider, StaticTokenProvider};
pub use config::{Config, StoreConfig};
pub use session::Session;
pub use supabase::SupabaseRepository;
