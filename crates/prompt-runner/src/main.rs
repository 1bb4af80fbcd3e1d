// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// prompt-runner: run the Element Send Keys user prompt suite against a
// WebDriver remote end.
//
// Exit status: 0 when every selected scenario passes, 1 when any fails,
// 2 on configuration errors.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use webdriver_prompts::scenarios::filter_table;
use webdriver_prompts::{DEFAULT_WEBDRIVER_URL, SuiteOptions, run_suite, table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "prompt-runner",
    about = "Checks Element Send Keys against open user prompts under each unhandledPromptBehavior"
)]
struct Cli {
    /// WebDriver remote end URL
    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Only run scenarios whose id matches this glob, e.g. 'accept*'
    #[arg(long)]
    filter: Option<String>,

    /// Extra alwaysMatch capabilities as a JSON object, e.g. '{"browserName":"firefox"}'
    #[arg(long, value_parser = parse_capabilities)]
    capabilities: Option<Map<String, Value>>,

    /// How long to wait for a user prompt to appear
    #[arg(long, default_value_t = 15_000)]
    dialog_timeout_ms: u64,

    /// Per-request HTTP timeout
    #[arg(long, default_value_t = 60_000)]
    request_timeout_ms: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level: error, warn, info, debug, trace (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the scenario table and exit without contacting the remote end
    #[arg(long)]
    list: bool,
}

fn parse_capabilities(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("capabilities are not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("capabilities must be a JSON object, got {}", other),
    }
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

impl Cli {
    fn suite_options(&self) -> SuiteOptions {
        let mut options = SuiteOptions::new()
            .webdriver_url(self.webdriver_url.clone())
            .capabilities(self.capabilities.clone().unwrap_or_default())
            .dialog_timeout(Duration::from_millis(self.dialog_timeout_ms))
            .request_timeout(Duration::from_millis(self.request_timeout_ms));
        if let Some(filter) = &self.filter {
            options = options.filter(filter.clone());
        }
        options
    }
}

fn list(cli: &Cli) -> Result<()> {
    let scenarios = match &cli.filter {
        Some(pattern) => filter_table(pattern)?,
        None => table(),
    };
    match cli.format {
        Format::Text => {
            for scenario in &scenarios {
                println!("{}", scenario);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&scenarios)?),
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<bool> {
    let report = run_suite(&cli.suite_options())
        .await
        .context("suite could not start")?;
    match cli.format {
        Format::Text => println!("{}", report),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(report.is_success())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("error: {:#}", e);
        return ExitCode::from(2);
    }

    if cli.list {
        return match list(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {:#}", e);
                ExitCode::from(2)
            }
        };
    }

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capabilities() {
        let caps = parse_capabilities(r#"{"browserName":"firefox"}"#).unwrap();
        assert_eq!(caps.get("browserName"), Some(&Value::from("firefox")));

        assert!(parse_capabilities("[1,2]").is_err());
        assert!(parse_capabilities("{not json").is_err());
    }

    #[test]
    fn test_cli_maps_onto_suite_options() {
        let cli = Cli::parse_from([
            "prompt-runner",
            "--webdriver-url",
            "http://localhost:9515",
            "--filter",
            "ignore*",
            "--dialog-timeout-ms",
            "500",
            "--capabilities",
            r#"{"browserName":"chrome"}"#,
        ]);
        let options = cli.suite_options();

        assert_eq!(options.webdriver_url, "http://localhost:9515");
        assert_eq!(options.filter.as_deref(), Some("ignore*"));
        assert_eq!(options.dialog_timeout, Duration::from_millis(500));
        assert_eq!(
            options.capabilities.get("browserName"),
            Some(&Value::from("chrome"))
        );
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
