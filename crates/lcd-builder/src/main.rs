//! Display Builder command line entry point.
//!
//! # What happens at startup
//!
//! 1. CLI arguments are parsed with `clap` into a [`Cli`] struct.
//! 2. The config file is loaded (defaults when it does not exist).
//! 3. `tracing_subscriber` is initialised.  `RUST_LOG` wins; otherwise the
//!    configured `log_level` applies.  Logs go to stderr so `--json` output
//!    on stdout stays machine-readable.
//! 4. The level catalog is loaded from `--levels`, the configured
//!    `levels_path`, or the bundled catalog, in that order.
//! 5. The subcommand runs.
//!
//! Exit status: `0` when a check passes (and for the listing commands), `1`
//! when a check fails, `2` for any error that prevented a verdict.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lcd_builder::application::level_source::LevelSource;
use lcd_builder::application::session::{BuildSession, RunReport};
use lcd_builder::infrastructure::storage::build_file::BuildFile;
use lcd_builder::infrastructure::storage::config::{self, BuilderConfig};
use lcd_builder::infrastructure::storage::levels::{BundledLevels, JsonLevelFile};
use lcd_core::catalog;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Assemble LCD layer stacks and check them against level requirements.
#[derive(Debug, Parser)]
#[command(name = "lcd-builder", version)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, env = "LCD_BUILDER_CONFIG")]
    config: Option<PathBuf>,

    /// JSON level catalog to use instead of the configured or bundled one.
    #[arg(long, global = true)]
    levels: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the layer archetypes a stack can be built from.
    Catalog,
    /// List the levels and their requirements.
    Levels,
    /// Check the build described by a TOML file.
    Check {
        build_file: PathBuf,
        /// Print the run report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Result of a command that completed without error.
enum Outcome {
    Done,
    Passed,
    Failed,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let log_level = loaded
        .as_ref()
        .map(|cfg| cfg.builder.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => cfg,
        Err(config::ConfigError::NoPlatformConfigDir) => {
            info!("no platform config directory; using defaults");
            BuilderConfig::default()
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(cli, &config) {
        Ok(Outcome::Done | Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, config: &BuilderConfig) -> anyhow::Result<Outcome> {
    match cli.command {
        Command::Catalog => {
            print_catalog();
            Ok(Outcome::Done)
        }
        Command::Levels => {
            let session = open_session(cli.levels, config)?;
            print_levels(&session);
            Ok(Outcome::Done)
        }
        Command::Check { build_file, json } => {
            let mut session = open_session(cli.levels, config)?;
            let build = BuildFile::load(&build_file)
                .with_context(|| format!("cannot read build file {}", build_file.display()))?;
            build.apply(&mut session)?;

            let [width, height, res_width, res_height] = build.display_fields();
            let report = session.run_raw(&width, &height, &res_width, &res_height)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_text(&report));
            }

            Ok(if report.passed() {
                Outcome::Passed
            } else {
                Outcome::Failed
            })
        }
    }
}

/// The verdict message on failure, the results panel on pass.
fn render_text(report: &RunReport) -> String {
    if report.passed() {
        report.describe()
    } else {
        report.report.verdict.message.clone()
    }
}

fn open_session(levels: Option<PathBuf>, config: &BuilderConfig) -> anyhow::Result<BuildSession> {
    let source: Box<dyn LevelSource> = match levels.or_else(|| config.builder.levels_path.clone()) {
        Some(path) => Box::new(JsonLevelFile::new(path)),
        None => Box::new(BundledLevels),
    };
    BuildSession::from_source(source.as_ref(), config.stack_limits())
        .with_context(|| format!("cannot load levels from {}", source.describe()))
}

fn print_catalog() {
    for archetype in catalog() {
        println!(
            "{:<22} {:<22} {:<15} min {:.1}mm",
            archetype.id.as_str(),
            archetype.name,
            archetype.kind.to_string(),
            archetype.min_thickness_mm
        );
    }
}

fn print_levels(session: &BuildSession) {
    for level in session.levels().iter() {
        println!("[{}] {}", level.id, level.name);
        println!("    {}", level.description);
        let summary = level.requirements.summary();
        if summary.is_empty() {
            println!("    no requirements");
        }
        for line in summary {
            println!("    - {line}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lcd_core::{ArchetypeId, DisplaySpec};

    #[test]
    fn test_cli_parses_check_with_json_flag() {
        let cli = Cli::parse_from(["lcd-builder", "check", "build.toml", "--json"]);

        match cli.command {
            Command::Check { build_file, json } => {
                assert_eq!(build_file, PathBuf::from("build.toml"));
                assert!(json);
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_accepts_global_levels_after_subcommand() {
        let cli = Cli::parse_from(["lcd-builder", "levels", "--levels", "custom.json"]);
        assert_eq!(cli.levels, Some(PathBuf::from("custom.json")));
        assert!(matches!(cli.command, Command::Levels));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["lcd-builder"]).is_err());
    }

    #[test]
    fn test_open_session_defaults_to_bundled_levels() {
        let session = open_session(None, &BuilderConfig::default()).unwrap();
        assert!(!session.levels().is_empty());
    }

    #[test]
    fn test_render_text_shows_only_panel_on_pass() {
        let mut session = open_session(None, &BuilderConfig::default()).unwrap();
        for id in [
            ArchetypeId::StandardBacklight,
            ArchetypeId::Polarizer,
            ArchetypeId::TftArray,
            ArchetypeId::LiquidCrystal,
            ArchetypeId::Polarizer,
            ArchetypeId::StandardGlass,
        ] {
            session.add_layer(id);
        }

        let report = session.run(DisplaySpec::new(16, 9, 1920, 1080));

        assert!(report.passed());
        assert!(render_text(&report).starts_with("Type: LCD\n"));
    }

    #[test]
    fn test_render_text_shows_message_on_failure() {
        let mut session = open_session(None, &BuilderConfig::default()).unwrap();
        session.add_layer(ArchetypeId::StandardGlass);

        let report = session.run(DisplaySpec::new(16, 9, 1920, 1080));

        assert_eq!(
            render_text(&report),
            "Structure Error: Display's layers are not placed correctly."
        );
    }

    #[test]
    fn test_open_session_reports_missing_levels_file() {
        let err = open_session(
            Some(PathBuf::from("/nonexistent/levels.json")),
            &BuilderConfig::default(),
        )
        .err()
        .expect("missing file must fail");
        assert!(format!("{err:#}").contains("/nonexistent/levels.json"));
    }
}
