use a2ui_protocol::constants::DEFAULT_SURFACE_ID;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "a2ui")]
#[command(about = "Replay and inspect A2UI message feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory containing `.a2ui/config.toml` (defaults to the
    /// current directory)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a JSON Lines feed and print the render tree of each surface
    Replay {
        /// Feed file, or `-` for stdin
        input: String,

        /// Only print this surface
        #[arg(short, long)]
        surface: Option<String>,

        /// Print trees as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Apply a feed and print one resolved data value as JSON
    Get {
        /// Feed file, or `-` for stdin
        input: String,

        #[arg(short, long, default_value = DEFAULT_SURFACE_ID)]
        surface: String,

        /// Binding path, absolute or relative to `--context`
        #[arg(short, long)]
        path: String,

        /// Data context path for relative bindings
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Print a well-formed userAction message
    Action {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = DEFAULT_SURFACE_ID)]
        surface: String,

        #[arg(long)]
        component: String,

        /// Context entry as `key=value`; values that parse as JSON are
        /// sent as JSON, anything else as a string
        #[arg(long = "context", value_parser = parse_context_entry)]
        context: Vec<(String, String)>,
    },
}

fn parse_context_entry(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_entry() {
        assert_eq!(
            parse_context_entry("qty=2"),
            Ok(("qty".to_string(), "2".to_string()))
        );
        assert_eq!(
            parse_context_entry("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_context_entry("=x").is_err());
        assert!(parse_context_entry("novalue").is_err());
    }

    #[test]
    fn test_surface_defaults_to_default_surface() {
        let cli = Cli::try_parse_from(["a2ui", "action", "--name", "go", "--component", "btn"])
            .expect("valid arguments");
        match cli.command {
            Commands::Action { surface, .. } => assert_eq!(surface, DEFAULT_SURFACE_ID),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["a2ui", "get", "feed.jsonl", "--path", "/x"])
            .expect("valid arguments");
        match cli.command {
            Commands::Get { surface, .. } => assert_eq!(surface, "@default"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
