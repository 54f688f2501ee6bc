mod cli;
mod render;

use a2ui_core::config::{load_config, RuntimeConfig};
use a2ui_core::MessageProcessor;
use a2ui_protocol::client_messages::{ClientToServerMessage, UserAction};
use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::eyre::{eyre, WrapErr};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let root = match &cli.config {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().wrap_err("failed to read current directory")?,
    };
    let config = load_config(&root).await?;
    tracing::debug!(?config, root = %root.display(), "loaded configuration");

    match cli.command {
        Commands::Replay {
            input,
            surface,
            json,
        } => replay(config, &input, surface.as_deref(), json).await,
        Commands::Get {
            input,
            surface,
            path,
            context,
        } => get(config, &input, &surface, &path, context.as_deref()).await,
        Commands::Action {
            name,
            surface,
            component,
            context,
        } => action(name, surface, component, context),
    }
}

async fn replay(
    config: RuntimeConfig,
    input: &str,
    only: Option<&str>,
    json: bool,
) -> color_eyre::Result<()> {
    let processor = load_feed(config, input).await?;

    let mut ids: Vec<&str> = processor.surfaces().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();
    if let Some(only) = only {
        if !ids.contains(&only) {
            return Err(eyre!("surface '{only}' not found in feed"));
        }
        ids.retain(|id| *id == only);
    }

    if json {
        let mut out = Map::new();
        for id in ids {
            let tree = processor.render_tree(id);
            out.insert(id.to_string(), serde_json::to_value(tree)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for id in ids {
            let Some(surface) = processor.get_surface(id) else {
                continue;
            };
            print!("{}", render::surface_to_text(surface, processor.render_tree(id).as_ref()));
        }
    }
    Ok(())
}

async fn get(
    config: RuntimeConfig,
    input: &str,
    surface_id: &str,
    path: &str,
    context: Option<&str>,
) -> color_eyre::Result<()> {
    let processor = load_feed(config, input).await?;
    if processor.get_surface(surface_id).is_none() {
        return Err(eyre!("surface '{surface_id}' not found in feed"));
    }

    let resolved = processor.resolve_path(path, context);
    let value = processor
        .get_data(surface_id, path, context)
        .ok_or_else(|| eyre!("no value at '{resolved}' on surface '{surface_id}'"))?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn action(
    name: String,
    surface_id: String,
    component_id: String,
    entries: Vec<(String, String)>,
) -> color_eyre::Result<()> {
    let context: Map<String, Value> = entries
        .into_iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            (key, value)
        })
        .collect();

    let message =
        ClientToServerMessage::user_action(UserAction::new(name, surface_id, component_id, context));
    println!("{}", serde_json::to_string(&message)?);
    Ok(())
}

/// Apply a whole feed from a file or stdin. Ctrl-C stops between messages.
async fn load_feed(config: RuntimeConfig, input: &str) -> color_eyre::Result<MessageProcessor> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if input == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let path = PathBuf::from(input);
        let file = tokio::fs::File::open(&path)
            .await
            .wrap_err_with(|| format!("failed to open {}", path.display()))?;
        Box::new(BufReader::new(file))
    };

    let cancel = CancellationToken::new();
    let guard = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let mut processor = MessageProcessor::new().with_config(config);
    let summary = processor.process_json_lines(reader, &cancel).await;
    guard.abort();
    let summary = summary?;

    tracing::info!(
        applied = summary.applied,
        skipped = summary.skipped,
        rejected = summary.rejected,
        "feed applied"
    );
    if summary.skipped + summary.rejected > 0 {
        eprintln!(
            "warning: {} line(s) skipped, {} message(s) partially rejected",
            summary.skipped, summary.rejected
        );
    }
    Ok(processor)
}
