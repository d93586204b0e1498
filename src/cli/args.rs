// src/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the companion store
    #[arg(long, value_name = "URL", env = "SUPABASE_URL", global = true)]
    pub store_url: Option<String>,

    /// Anonymous access key of the companion store
    #[arg(long, value_name = "KEY", env = "SUPABASE_ANON_KEY", hide_env_values = true, global = true)]
    pub anon_key: Option<String>,

    /// Session access token; read from COMPANION_ACCESS_TOKEN on each request when omitted
    #[arg(long, value_name = "TOKEN", global = true)]
    pub access_token: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (serve, list, or delete)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the companion library web server
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// List companions, optionally filtered
    List {
        /// Only companions of this subject
        #[arg(short, long, value_name = "SUBJECT")]
        subject: Option<String>,

        /// Only companions whose topic or name contains this text
        #[arg(short, long, value_name = "TOPIC")]
        topic: Option<String>,

        /// Output companions as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Render the list as HTML and open it in the browser
        #[arg(long)]
        html: bool,
    },

    /// Delete a companion from the store
    Delete {
        /// Companion ID to delete
        #[arg(value_name = "COMPANION_ID")]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
