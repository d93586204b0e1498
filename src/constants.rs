// src/constants.rs
//
// Application-wide constants. Each constant is documented with its purpose
// and where it is used.

/// Remote table holding companion rows.
///
/// Used in: `infrastructure/config.rs`, `infrastructure/supabase.rs`
pub const DEFAULT_TABLE: &str = "companions";

/// Address the web server listens on when neither config nor CLI set one.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Directory under the platform config dir holding `config.toml`.
pub const APP_DIR_NAME: &str = "companion-library";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding the access token for `list` and `delete`.
///
/// Read on every store request so a refreshed token takes effect. The web
/// server never reads it; each request brings its own session.
///
/// Used in: `lib.rs`
pub const ACCESS_TOKEN_ENV: &str = "COMPANION_ACCESS_TOKEN";

/// Path segments of the REST interface below the store URL.
///
/// Used in: `infrastructure/supabase.rs`
pub const REST_PATH: [&str; 2] = ["rest", "v1"];

/// Delay in milliseconds after writing HTML file before opening browser.
///
/// The browser needs a brief moment for the file to be fully written before
/// it is opened, otherwise it may show an empty page.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

/// Cookie carrying the browser's session token to the web server.
///
/// Requests may instead send `Authorization: Bearer <token>`.
///
/// Used in: `infrastructure/session.rs`
pub const SESSION_COOKIE: &str = "sb-access-token";
