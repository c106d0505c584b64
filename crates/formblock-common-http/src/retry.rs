// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request retry executor with exponential backoff.
//!
//! A request operation is invoked once, then up to [`MAX_RETRIES`] more
//! times. An attempt fails when the operation returns an error or when it
//! resolves with a status of 400 or above; both cases are handled alike.
//! Retries receive [`RetryOptions`] describing the retry, and are preceded by
//! a delay of `2^retry_count` seconds.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::{AttemptFailure, RetryError};
use crate::options::RetryOptions;
use crate::sleeper::{Sleeper, TokioSleeper};

/// Additional attempts after the first one.
pub const MAX_RETRIES: u32 = 2;

/// Delay before the first retry; doubles for each retry after it.
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

/// Anything carrying an optional HTTP-like status code.
///
/// Responses without a status are always accepted.
pub trait StatusResponse {
	fn status(&self) -> Option<u16>;
}

impl StatusResponse for reqwest::Response {
	fn status(&self) -> Option<u16> {
		Some(reqwest::Response::status(self).as_u16())
	}
}

impl StatusResponse for serde_json::Value {
	fn status(&self) -> Option<u16> {
		let status = self.get("status")?.as_f64()?;
		// Out-of-range values saturate so the >= 400 comparison still holds.
		Some(status.clamp(0.0, f64::from(u16::MAX)) as u16)
	}
}

impl StatusResponse for Option<u16> {
	fn status(&self) -> Option<u16> {
		*self
	}
}

/// Delay inserted before retry number `retry_count + 1`.
pub fn backoff_delay(retry_count: u32) -> Duration {
	BASE_DELAY.saturating_mul(2u32.saturating_pow(retry_count))
}

fn classify<R, E>(outcome: Result<R, E>) -> Result<R, AttemptFailure>
where
	R: StatusResponse,
	E: Display,
{
	match outcome {
		Ok(response) => match response.status() {
			Some(status) if status >= 400 => Err(AttemptFailure::Status(status)),
			_ => Ok(response),
		},
		Err(err) => Err(AttemptFailure::Operation(err.to_string())),
	}
}

/// Runs a request operation until it succeeds or the retry budget is spent.
///
/// Attempts never overlap, and a started sequence always runs to success or
/// exhaustion.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor<S = TokioSleeper> {
	sleeper: S,
}

impl RetryExecutor {
	pub fn new() -> Self {
		Self {
			sleeper: TokioSleeper,
		}
	}
}

impl<S: Sleeper> RetryExecutor<S> {
	/// Uses `sleeper` to wait out backoff delays.
	pub fn with_sleeper(sleeper: S) -> Self {
		Self { sleeper }
	}

	/// Invokes `request` with `None` first, then with fresh [`RetryOptions`]
	/// on each retry.
	pub async fn execute<F, Fut, R, E>(&self, mut request: F) -> Result<R, RetryError>
	where
		F: FnMut(Option<RetryOptions>) -> Fut,
		Fut: Future<Output = Result<R, E>>,
		R: StatusResponse,
		E: Display,
	{
		let max_attempts = MAX_RETRIES + 1;
		let mut retry_count = 0;

		loop {
			let options = (retry_count > 0).then(|| RetryOptions::now(retry_count));

			let failure = match classify(request(options).await) {
				Ok(response) => return Ok(response),
				Err(failure) => failure,
			};

			warn!(
					error = %failure,
					attempt = retry_count + 1,
					"request attempt failed"
			);

			if retry_count >= MAX_RETRIES {
				error!(
						error = %failure,
						attempts = max_attempts,
						"all retry attempts failed"
				);
				return Err(RetryError {
					attempts: max_attempts,
					last: failure,
				});
			}

			let delay = backoff_delay(retry_count);
			info!(
					attempt = retry_count + 2,
					max_attempts = max_attempts,
					delay_ms = delay.as_millis(),
					"retrying request"
			);

			self.sleeper.sleep(delay).await;
			retry_count += 1;
		}
	}
}

/// Runs `request` through a [`RetryExecutor`] backed by the tokio timer.
pub async fn retry_request<F, Fut, R, E>(request: F) -> Result<R, RetryError>
where
	F: FnMut(Option<RetryOptions>) -> Fut,
	Fut: Future<Output = Result<R, E>>,
	R: StatusResponse,
	E: Display,
{
	RetryExecutor::new().execute(request).await
}
