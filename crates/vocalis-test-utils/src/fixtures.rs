// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request fixtures.

use base64::Engine;

use vocalis_core::types::{FieldMap, RequestFields};

/// A valid voice sample data URI decoding to three zero bytes.
pub const SAMPLE_WAV_URI: &str = "data:audio/wav;base64,AAAA";

pub const SAMPLE_EMAIL: &str = "u@x.com";

pub const SAMPLE_PASSWORD: &str = "p";

/// Encode `bytes` as an `audio/wav` base64 data URI.
pub fn wav_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:audio/wav;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Build a field map from string pairs.
pub fn field_map(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Request fields from body and query pairs.
pub fn request_fields(body: &[(&str, &str)], query: &[(&str, &str)]) -> RequestFields {
    RequestFields::new(field_map(body), field_map(query))
}

/// A request whose body carries all three sample credentials.
pub fn complete_request() -> RequestFields {
    request_fields(
        &[
            ("email", SAMPLE_EMAIL),
            ("password", SAMPLE_PASSWORD),
            ("wav", SAMPLE_WAV_URI),
        ],
        &[],
    )
}
