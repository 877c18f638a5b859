//! Modal flows demo
//!
//! Runs the example flows against a scripted terminal host and prints the
//! stream events each flow produces.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use modal_core::ModalConfig;
use modal_surfaces::MediaLibraryAuthorizationStatus;
use std::path::{Path, PathBuf};
use url::Url;

mod flows;
mod host;

use flows::{run_flow, Flow};
use host::{ComposeOutcome, Script};

#[derive(Parser)]
#[command(name = "modal-demo")]
#[command(about = "Present modal flows against a scripted terminal host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available flows
    List,

    /// Run one flow and print its transcript
    Run {
        /// Flow to run
        #[arg(value_enum)]
        flow: Flow,

        #[command(flatten)]
        script: ScriptArgs,
    },
}

/// Scripted user behaviour
#[derive(Args)]
struct ScriptArgs {
    /// Title of the dialog action to tap (repeat for chained dialogs)
    #[arg(long = "tap", value_name = "TITLE")]
    taps: Vec<String>,

    /// Text typed into the next dialog field (repeat per field)
    #[arg(long = "field", value_name = "TEXT")]
    fields: Vec<String>,

    /// How composers finish
    #[arg(long, value_enum, default_value_t = ComposeOutcome::Sent)]
    compose: ComposeOutcome,

    /// Number of items picked; 0 cancels the media picker
    #[arg(long, default_value_t = 1)]
    pick: usize,

    /// Callback URL completing web sessions
    #[arg(long, value_name = "URL")]
    callback: Option<String>,

    /// Deny the media library prompt
    #[arg(long)]
    deny_media_library: bool,

    /// Pretend no mail account is configured
    #[arg(long)]
    no_mail: bool,

    /// Pretend text messages cannot be sent
    #[arg(long)]
    no_messages: bool,
}

impl ScriptArgs {
    fn into_script(self) -> Result<Script> {
        let callback = self
            .callback
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("Invalid --callback URL")?;

        Ok(Script {
            taps: self.taps.into(),
            fields: self.fields.into(),
            compose: self.compose,
            pick: self.pick,
            callback,
            media_library: if self.deny_media_library {
                MediaLibraryAuthorizationStatus::Denied
            } else {
                MediaLibraryAuthorizationStatus::Authorized
            },
            can_send_mail: !self.no_mail,
            can_send_text: !self.no_messages,
        })
    }
}

fn load_config(path: Option<&Path>) -> Result<ModalConfig> {
    let mut config = match path {
        Some(path) => ModalConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ModalConfig::default(),
    };
    config.merge_with_env()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => {
            for flow in Flow::value_variants() {
                if let Some(name) = flow.to_possible_value() {
                    println!("{:<18} {}", name.get_name(), flow.title());
                }
            }
        }

        Commands::Run { flow, script } => {
            let config = load_config(cli.config.as_deref())?;
            let transcript = run_flow(flow, script.into_script()?, config).await;
            println!("{transcript}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_script_from_args() {
        let cli = Cli::parse_from([
            "modal-demo",
            "run",
            "web-session",
            "--tap",
            "Continue",
            "--field",
            "client-42",
            "--callback",
            "modal-demo://done",
            "--no-mail",
        ]);
        let Commands::Run { flow, script } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(flow, Flow::WebSession);

        let script = script.into_script().unwrap();
        assert_eq!(script.taps, vec!["Continue".to_string()]);
        assert_eq!(script.callback.unwrap().scheme(), "modal-demo");
        assert!(!script.can_send_mail);
        assert!(script.can_send_text);
    }

    #[test]
    fn test_invalid_callback_is_rejected() {
        let cli = Cli::parse_from(["modal-demo", "run", "web-session", "--callback", "::"]);
        let Commands::Run { script, .. } = cli.command else {
            panic!("expected run");
        };
        assert!(script.into_script().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "animated = false").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert!(!config.animated);
    }

    #[test]
    fn test_shipped_demo_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/demo.toml");
        let config = ModalConfig::load_from_file(&path).unwrap();
        assert_eq!(config, ModalConfig::immediate());
    }
}
