use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reed::PageConfig;
use reed::behaviors::format_phone;
use reed::platform::replay::{Replay, ReplayReport, Scenario};

#[derive(Parser)]
#[command(name = "reed")]
#[command(about = "Run the REED page behaviors outside the browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a phone number the way the phone fields do while typing
    Phone {
        /// Raw field value
        value: String,
    },
    /// Validate a page config file and print it with defaults filled in
    CheckConfig {
        /// Path to the JSON config
        file: PathBuf,
    },
    /// Replay a scenario against the in-memory page and print the report
    Replay {
        /// Path to the JSON scenario
        file: PathBuf,
        /// Config overriding the one embedded in the scenario
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Phone { value } => {
            println!("{}", format_phone(&value).unwrap_or(value));
        }
        Commands::CheckConfig { file } => {
            let config = load_config(&file)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Replay {
            file,
            config,
            compact,
        } => {
            let report = replay(&file, config.as_deref())?;
            let json = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<PageConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    PageConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn replay(path: &Path, config: Option<&Path>) -> Result<ReplayReport> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let mut scenario = Scenario::from_json(&json)
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    if let Some(config) = config {
        scenario.config = load_config(config)?;
    }
    log::info!(
        "Replaying {} event(s) from {}",
        scenario.events.len(),
        path.display()
    );
    Ok(Replay::run(&scenario)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn config_file_is_validated() {
        let good = temp_json(r#"{ "navbar": { "scroll_threshold": 80 } }"#);
        assert_eq!(load_config(good.path()).unwrap().navbar.scroll_threshold, 80.0);

        let bad = temp_json(r#"{ "forms": { "required_selector": "form [required]" } }"#);
        let error = load_config(bad.path()).unwrap_err();
        assert!(format!("{error:#}").contains("forms.required_selector"));
    }

    #[test]
    fn config_flag_overrides_scenario_config() {
        let scenario = temp_json(
            r#"{
                "config": { "navbar": { "scroll_threshold": 500 } },
                "page": { "elements": [ { "tag": "nav", "classes": ["navbar"] } ] },
                "events": [ { "kind": "scroll", "y": 100 } ]
            }"#,
        );
        let report = replay(scenario.path(), None).unwrap();
        assert_eq!(report.page.elements[0].classes, vec!["navbar"]);

        let config = temp_json(r#"{ "navbar": { "scroll_threshold": 20 } }"#);
        let report = replay(scenario.path(), Some(config.path())).unwrap();
        assert_eq!(report.page.elements[0].classes, vec!["navbar", "navbar-scrolled"]);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let scenario = temp_json(r#"{ "events": [ { "kind": "submit", "selector": "form" } ] }"#);
        let error = replay(scenario.path(), None).unwrap_err();
        assert!(error.to_string().contains("no element #0 matches `form`"));
    }
}
