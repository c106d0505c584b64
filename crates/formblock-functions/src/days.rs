// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Whole-day difference between two dates.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// A date argument as the form hands it over: raw field text or an instant
/// that has already been parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateInput {
	Text(String),
	Instant(DateTime<Utc>),
}

impl DateInput {
	fn resolve(&self) -> Option<DateTime<Utc>> {
		match self {
			Self::Text(text) => parse_date(text),
			Self::Instant(instant) => Some(*instant),
		}
	}
}

impl From<&str> for DateInput {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for DateInput {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<DateTime<Utc>> for DateInput {
	fn from(instant: DateTime<Utc>) -> Self {
		Self::Instant(instant)
	}
}

impl From<DateTime<FixedOffset>> for DateInput {
	fn from(instant: DateTime<FixedOffset>) -> Self {
		Self::Instant(instant.with_timezone(&Utc))
	}
}

impl From<NaiveDate> for DateInput {
	fn from(date: NaiveDate) -> Self {
		Self::Instant(date.and_time(chrono::NaiveTime::MIN).and_utc())
	}
}

/// Parses a date field value.
///
/// Accepts RFC 3339 date-times, offset-less ISO date-times (read as UTC),
/// `YYYY-MM-DD`, `YYYY-MM` and `YYYY` dates (UTC midnight at the start of the
/// period), and any of these with an expanded `+YYYYYY` / `-YYYYYY` year.
/// Anything else is `None`.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
	let text = text.trim();

	if text.starts_with(|c: char| c == '+' || c == '-') {
		return parse_expanded_year(text);
	}
	parse_four_digit_year(text)
}

fn parse_four_digit_year(text: &str) -> Option<DateTime<Utc>> {
	if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
		return Some(instant.with_timezone(&Utc));
	}

	for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
		if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
			return Some(naive.and_utc());
		}
	}

	NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.ok()
		.or_else(|| parse_reduced_date(text))
		.map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// `YYYY` or `YYYY-MM`, pinned to the first day of the period.
fn parse_reduced_date(text: &str) -> Option<NaiveDate> {
	let (year, month) = match text.split_once('-') {
		Some((year, month)) => (year, Some(month)),
		None => (text, None),
	};

	let all_digits =
		|part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
	if !all_digits(year, 4) {
		return None;
	}
	let month = match month {
		Some(month) if all_digits(month, 2) => month.parse().ok()?,
		Some(_) => return None,
		None => 1,
	};

	NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Six-digit signed years. The rest of the value is parsed against a stand-in
/// four-digit year with the same leap-ness, then shifted back.
fn parse_expanded_year(text: &str) -> Option<DateTime<Utc>> {
	let (sign, rest) = text.split_at(1);
	let digits = rest.get(..6)?;
	if !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	let magnitude: i32 = digits.parse().ok()?;
	let year = match sign {
		// -000000 is not a valid expanded year.
		"-" if magnitude == 0 => return None,
		"-" => -magnitude,
		_ => magnitude,
	};

	let stand_in = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
		2000
	} else {
		2001
	};
	let parsed = parse_four_digit_year(&format!("{stand_in}{}", &rest[6..]))?;
	parsed.with_year(parsed.year() - stand_in + year)
}

/// Number of whole days between `end` and `start`, in either order.
///
/// Returns 0 when either date is invalid.
pub fn days(end: impl Into<DateInput>, start: impl Into<DateInput>) -> i64 {
	let (Some(end), Some(start)) = (end.into().resolve(), start.into().resolve()) else {
		return 0;
	};

	(end - start).num_milliseconds().abs() / MS_PER_DAY
}
