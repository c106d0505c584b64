// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Retry metadata handed to a request operation on every attempt after the
//! first.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::RequestBuilder;
use serde::Serialize;

pub const HEADER_RETRY: &str = "X-Retry";
pub const HEADER_RETRY_COUNT: &str = "X-Retry-Count";
pub const HEADER_RETRY_TIME: &str = "X-Retry-Time";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RetryOptions {
	pub headers: RetryHeaders,
	pub body: RetryBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RetryHeaders {
	#[serde(rename = "X-Retry")]
	pub retry: String,
	#[serde(rename = "X-Retry-Count")]
	pub retry_count: String,
	/// ISO-8601 with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
	#[serde(rename = "X-Retry-Time")]
	pub retry_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryBody {
	pub retry: bool,
	pub retry_count: u32,
	/// Milliseconds since the Unix epoch.
	pub timestamp: i64,
}

impl RetryOptions {
	/// Builds the metadata for retry number `retry_count`, rendering `at` as
	/// both the header timestamp and the body timestamp.
	pub fn new(retry_count: u32, at: DateTime<Utc>) -> Self {
		Self {
			headers: RetryHeaders {
				retry: "true".to_string(),
				retry_count: retry_count.to_string(),
				retry_time: at.to_rfc3339_opts(SecondsFormat::Millis, true),
			},
			body: RetryBody {
				retry: true,
				retry_count,
				timestamp: at.timestamp_millis(),
			},
		}
	}

	/// Metadata stamped with the current time.
	pub fn now(retry_count: u32) -> Self {
		Self::new(retry_count, Utc::now())
	}

	/// Header name/value pairs in wire order.
	pub fn header_pairs(&self) -> [(&'static str, &str); 3] {
		[
			(HEADER_RETRY, self.headers.retry.as_str()),
			(HEADER_RETRY_COUNT, self.headers.retry_count.as_str()),
			(HEADER_RETRY_TIME, self.headers.retry_time.as_str()),
		]
	}

	/// Attaches the retry headers to an outgoing request. The body metadata
	/// is left to the caller, since it usually has to be merged into a
	/// payload of its own.
	pub fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
		self
			.header_pairs()
			.into_iter()
			.fold(request, |req, (name, value)| req.header(name, value))
	}
}
