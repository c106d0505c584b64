// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Submission endpoint configuration.
//!
//! Values come from an optional TOML file and are overridden by command line
//! arguments (which themselves fall back to environment variables).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading config file
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Missing required field
	#[error("Missing required field: {0}")]
	MissingField(String),

	/// Invalid value
	#[error("Invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// On-disk configuration file layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
	pub submit: SubmitSection,
}

/// `[submit]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmitSection {
	pub url: Option<String>,
	pub timeout_secs: Option<u64>,
	pub user_agent: Option<String>,
}

impl FileConfig {
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&content, path)
	}

	pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})
	}
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct SubmitOverrides {
	pub url: Option<String>,
	pub timeout_secs: Option<u64>,
}

/// Validated settings for one submission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
	pub url: String,
	pub timeout: Duration,
	pub user_agent: Option<String>,
}

impl SubmitConfig {
	pub fn resolve(file: FileConfig, overrides: SubmitOverrides) -> Result<Self, ConfigError> {
		let url = overrides
			.url
			.or(file.submit.url)
			.ok_or_else(|| ConfigError::MissingField("submit.url".to_string()))?;
		if !(url.starts_with("http://") || url.starts_with("https://")) {
			return Err(ConfigError::invalid_value(
				"submit.url",
				format!("expected an http(s) URL, got '{url}'"),
			));
		}

		let timeout_secs = overrides
			.timeout_secs
			.or(file.submit.timeout_secs)
			.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::invalid_value(
				"submit.timeout_secs",
				"must be greater than zero",
			));
		}

		Ok(Self {
			url,
			timeout: Duration::from_secs(timeout_secs),
			user_agent: file.submit.user_agent,
		})
	}
}
