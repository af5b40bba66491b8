// SPDX-FileCopyrightText: 2026 Vocalis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RFC 2397 `data:` URI decoding for submitted voice samples.
//!
//! `data:[<mediatype>][;base64],<data>`. Base64 payloads may be padded or
//! unpadded and may contain ASCII whitespace or percent-escapes; other payloads
//! are percent-decoded.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use percent_encoding::percent_decode_str;

use vocalis_core::types::DecodedAudio;
use vocalis_core::VocalisError;

const SCHEME: &str = "data:";

/// Media type assumed when the URI declares none.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a data URI into its media type and payload bytes.
///
/// Fails with [`VocalisError::MalformedAudio`] when the scheme or separator is
/// missing, the base64 payload is invalid, or the payload is empty.
pub fn decode(input: &str) -> Result<DecodedAudio, VocalisError> {
    let input = input.trim();
    let rest = strip_scheme(input).ok_or_else(|| malformed("missing `data:` scheme"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| malformed("missing `,` between header and payload"))?;

    let (media_type, is_base64) = parse_header(header);

    let unescaped: Vec<u8> = percent_decode_str(payload).collect();
    let bytes = if is_base64 {
        let compact: Vec<u8> = unescaped
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        BASE64
            .decode(&compact)
            .map_err(|e| malformed(&format!("invalid base64 payload: {e}")))?
    } else {
        unescaped
    };

    if bytes.is_empty() {
        return Err(malformed("payload is empty"));
    }

    Ok(DecodedAudio { media_type, bytes })
}

fn strip_scheme(input: &str) -> Option<&str> {
    let prefix = input.get(..SCHEME.len())?;
    prefix
        .eq_ignore_ascii_case(SCHEME)
        .then(|| &input[SCHEME.len()..])
}

/// Split the header into a media type and the base64 flag.
fn parse_header(header: &str) -> (String, bool) {
    let mut parts: Vec<&str> = header.split(';').map(str::trim).collect();

    let is_base64 = parts.len() > 1
        && parts
            .last()
            .is_some_and(|last| last.eq_ignore_ascii_case("base64"));
    if is_base64 {
        parts.pop();
    }

    let media_type = match (parts[0].is_empty(), parts.len() > 1) {
        (true, false) => DEFAULT_MEDIA_TYPE.to_string(),
        (true, true) => format!("text/plain;{}", parts[1..].join(";")),
        (false, _) => parts.join(";"),
    };

    (media_type, is_base64)
}

fn malformed(message: &str) -> VocalisError {
    VocalisError::MalformedAudio {
        message: message.to_string(),
    }
}
