// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use formblock_functions::{days, submit_form_array_to_string, FormData, HttpFormGlobals};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{FileConfig, SubmitConfig, SubmitOverrides};

/// Form widget helpers from the command line
#[derive(Parser, Debug)]
#[command(name = "formblock", version)]
struct Cli {
	/// Path to a TOML config file
	#[arg(long, global = true, env = "FORMBLOCK_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the number of whole days between two dates
	Days {
		/// End date (YYYY-MM-DD or RFC 3339)
		end: String,
		/// Start date (YYYY-MM-DD or RFC 3339)
		start: String,
	},

	/// Submit a JSON form export, joining array fields with commas
	Submit {
		/// JSON file holding the exported form data object
		data: PathBuf,

		/// Submission endpoint
		#[arg(long, env = "FORMBLOCK_SUBMIT_URL")]
		url: Option<String>,

		/// Per-request timeout in seconds
		#[arg(long)]
		timeout_secs: Option<u64>,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();

	match cli.command {
		Command::Days { end, start } => {
			println!("{}", days(end, start));
		}
		Command::Submit {
			data,
			url,
			timeout_secs,
		} => {
			let file = match &cli.config {
				Some(path) => FileConfig::load(path)?,
				None => FileConfig::default(),
			};
			let config = SubmitConfig::resolve(file, SubmitOverrides { url, timeout_secs })?;
			submit(&config, &data).await?;
		}
	}

	Ok(())
}

async fn submit(config: &SubmitConfig, data_path: &Path) -> Result<()> {
	let data = load_form_data(data_path)?;

	let builder = match &config.user_agent {
		Some(ua) => formblock_common_http::builder_with_user_agent(ua.clone()),
		None => formblock_common_http::builder(),
	};
	let client = builder
		.timeout(config.timeout)
		.build()
		.context("failed to build HTTP client")?;

	info!(url = %config.url, fields = data.len(), "submitting form");
	let globals = HttpFormGlobals::new(client, config.url.clone(), data);
	submit_form_array_to_string(&globals).await?;
	Ok(())
}

fn load_form_data(path: &Path) -> Result<FormData> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read form data from {}", path.display()))?;
	parse_form_data(&content).with_context(|| format!("invalid form data in {}", path.display()))
}

fn parse_form_data(content: &str) -> Result<FormData> {
	match serde_json::from_str(content)? {
		Value::Object(map) => Ok(map),
		other => bail!("expected a JSON object, got {}", json_kind(&other)),
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_days_arguments() {
		let cli = Cli::try_parse_from(["formblock", "days", "2024-03-10", "2024-03-01"]).unwrap();
		match cli.command {
			Command::Days { end, start } => {
				assert_eq!(end, "2024-03-10");
				assert_eq!(start, "2024-03-01");
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn parses_submit_arguments() {
		let cli = Cli::try_parse_from([
			"formblock",
			"submit",
			"form.json",
			"--url",
			"https://forms.example.com/submit",
			"--timeout-secs",
			"5",
		])
		.unwrap();
		match cli.command {
			Command::Submit {
				data,
				url,
				timeout_secs,
			} => {
				assert_eq!(data, PathBuf::from("form.json"));
				assert_eq!(url.as_deref(), Some("https://forms.example.com/submit"));
				assert_eq!(timeout_secs, Some(5));
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn form_data_must_be_an_object() {
		assert!(parse_form_data(r#"{"a": [1, 2]}"#).is_ok());
		let err = parse_form_data("[1, 2]").unwrap_err();
		assert!(err.to_string().contains("an array"));
		assert!(parse_form_data("not json").is_err());
	}

	#[test]
	fn load_form_data_reports_path() {
		let err = load_form_data(Path::new("/nonexistent/form.json")).unwrap_err();
		assert!(format!("{err:#}").contains("/nonexistent/form.json"));
	}
}
