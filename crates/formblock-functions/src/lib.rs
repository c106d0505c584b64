// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Helper functions exposed to the form widget.
//!
//! None of these panic on malformed input: invalid dates count as zero days
//! and odd array members are rendered the way a browser would join them.

mod days;
mod error;
mod http;
mod name;
mod submit;

pub use days::{days, parse_date, DateInput};
pub use error::SubmitError;
pub use http::HttpFormGlobals;
pub use name::get_full_name;
pub use submit::{
	flatten_array_fields, join_array, submit_form_array_to_string, FormData, FormGlobals,
	APPLICATION_JSON,
};
