// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

/// Joins a first and last name with a single space, trimming the result so a
/// missing half does not leave a dangling separator.
pub fn get_full_name(first_name: &str, last_name: &str) -> String {
	format!("{first_name} {last_name}").trim().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_both_names() {
		assert_eq!(get_full_name("Ada", "Lovelace"), "Ada Lovelace");
	}

	#[test]
	fn missing_half_is_trimmed() {
		assert_eq!(get_full_name("", "Lovelace"), "Lovelace");
		assert_eq!(get_full_name("Ada", ""), "Ada");
		assert_eq!(get_full_name("", ""), "");
	}
}
