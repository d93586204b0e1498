// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod ui;
pub mod util;

use crate::cli::args::{Args, Command};
use anyhow::{bail, Context, Result};
use application::{CompanionDeleter, CompanionLister, CompanionRepository};
use domain::{Companion, CompanionFilter};
use infrastructure::server::{self, AppState};
use infrastructure::{
    AccessTokenProvider, Config, EnvTokenProvider, StaticTokenProvider, StoreConfig,
    SupabaseRepository,
};
use ports::HtmlPresenter;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use ui::{DeleteControl, DeleteEvent};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args.config, ?args.command, "Starting companion-library");

    // Initialize configuration and infrastructure
    let config = Config::resolve(args.config.as_deref())?
        .with_overrides(args.store_url.as_deref(), args.anon_key.as_deref());

    match args.command {
        Command::Serve { bind } => {
            if args.access_token.is_some() {
                warn!("--access-token is ignored by serve; each request brings its own session");
            }
            // Anonymous base client; handlers open it per request session
            let store = SupabaseRepository::new(&config.store, Arc::new(StaticTokenProvider::default()))
                .context("Failed to create companion store client")?;

            let addr = bind.unwrap_or(config.server.bind);
            let listener = tokio::net::TcpListener::bind(addr.as_str())
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            server::serve(listener, AppState::new(Arc::new(store))).await
        }
        Command::List {
            subject,
            topic,
            json,
            html,
        } => {
            let repository = cli_repository(&config.store, args.access_token)?;
            let filter = CompanionFilter::new(subject.as_deref(), topic.as_deref());
            let companions = CompanionLister::new(repository)
                .list_companions(&filter)
                .await
                .context("Failed to list companions")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&companions)?);
            } else if html {
                let presenter = HtmlPresenter::new();
                let page = presenter.render_list_document("Companions", &companions);
                let mut renderer = infrastructure::renderer::ContentRenderer::new();
                let path = renderer.create_temp_file(&page)?;
                renderer.open_in_browser(&path).await?;
            } else {
                for companion in &companions {
                    println!("{}", format_companion_line(companion));
                }
            }
            Ok(())
        }
        Command::Delete { id, yes } => {
            let deleter = CompanionDeleter::new(cli_repository(&config.store, args.access_token)?);
            let mut input = BufReader::new(tokio::io::stdin());
            match confirm_and_delete(&deleter, &id, yes, &mut input).await? {
                Some(DeleteEvent::Deleted(confirmation)) => {
                    println!(
                        "Deleted companion {} ({})",
                        confirmation.id, confirmation.companion.name
                    );
                    Ok(())
                }
                Some(DeleteEvent::Failed { notice, reason }) => bail!("{notice} {reason}"),
                None => {
                    println!("Cancelled");
                    Ok(())
                }
            }
        }
    }
}

/// Store client for one-shot commands, acting as `--access-token` or
/// whatever `COMPANION_ACCESS_TOKEN` holds
fn cli_repository(
    store: &StoreConfig,
    access_token: Option<String>,
) -> Result<Arc<dyn CompanionRepository>> {
    let tokens: Arc<dyn AccessTokenProvider> = match access_token {
        Some(token) => Arc::new(StaticTokenProvider::new(Some(token))),
        None => Arc::new(EnvTokenProvider::new(constants::ACCESS_TOKEN_ENV)),
    };

    let repository = SupabaseRepository::new(store, tokens)
        .context("Failed to create companion store client")?;
    Ok(Arc::new(repository))
}

/// One tab-separated line per companion
pub fn format_companion_line(companion: &Companion) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        companion.id, companion.subject, companion.name, companion.topic, companion.duration
    )
}

/// Walk the delete control through both triggers.
///
/// Unless `yes` is set, the user must answer `y` between the first trigger
/// and the second one; any other answer cancels and returns `None`.
pub async fn confirm_and_delete<R, I>(
    deleter: &CompanionDeleter<R>,
    id: &str,
    yes: bool,
    input: &mut I,
) -> Result<Option<DeleteEvent>>
where
    R: CompanionRepository,
    I: AsyncBufRead + Unpin,
{
    let mut control = DeleteControl::new(id, id);
    control.request();

    if !yes {
        print!("{}? [y/N] ", control.view().primary_label);
        std::io::stdout().flush().context("Failed to flush prompt")?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .await
            .context("Failed to read confirmation")?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            control.cancel();
            info!(companion_id = id, "Delete cancelled");
            return Ok(None);
        }
    }

    match control.request() {
        Some(effect) => Ok(control.settle(effect, deleter).await),
        None => Ok(None),
    }
}
