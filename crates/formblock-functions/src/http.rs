// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Form runtime backed by an HTTP submission endpoint.

use async_trait::async_trait;
use formblock_common_http::{RetryExecutor, Sleeper, TokioSleeper};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::SubmitError;
use crate::submit::{FormData, FormGlobals};

/// Exports a fixed data set and POSTs submissions to `url`, retrying failed
/// requests.
pub struct HttpFormGlobals<S = TokioSleeper> {
	client: Client,
	url: String,
	data: FormData,
	executor: RetryExecutor<S>,
}

impl HttpFormGlobals {
	pub fn new(client: Client, url: impl Into<String>, data: FormData) -> Self {
		Self::with_executor(client, url, data, RetryExecutor::new())
	}
}

impl<S: Sleeper> HttpFormGlobals<S> {
	pub fn with_executor(
		client: Client,
		url: impl Into<String>,
		data: FormData,
		executor: RetryExecutor<S>,
	) -> Self {
		Self {
			client,
			url: url.into(),
			data,
			executor,
		}
	}
}

#[async_trait]
impl<S: Sleeper> FormGlobals for HttpFormGlobals<S> {
	fn export_data(&self) -> Option<FormData> {
		Some(self.data.clone())
	}

	async fn submit_form(
		&self,
		data: FormData,
		validate: bool,
		content_type: &str,
	) -> Result<(), SubmitError> {
		let payload = serde_json::to_vec(&Value::Object(data))?;
		debug!(url = %self.url, validate, bytes = payload.len(), "posting form data");

		let response = self
			.executor
			.execute(|options| {
				let request = self
					.client
					.post(&self.url)
					.header(CONTENT_TYPE, content_type)
					.body(payload.clone());
				let request = match &options {
					Some(options) => options.apply_headers(request),
					None => request,
				};
				request.send()
			})
			.await?;

		info!(url = %self.url, status = response.status().as_u16(), "form submitted");
		Ok(())
	}
}
