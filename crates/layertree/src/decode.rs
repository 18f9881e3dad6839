//! `data:` URI decoding for embedded image payloads.
//!
//! Only in-memory payloads are supported; an href naming an external file or
//! URL is rejected rather than fetched.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use log::trace;
use thiserror::Error;

/// Standard alphabet, accepting payloads with or without `=` padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// MIME type assumed when a data URI omits it.
const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Why an href could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("href is not a `data:` URI")]
    NotDataUri,

    #[error("data URI has no `,` separating the header from the payload")]
    MissingPayload,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("data URI payload is empty")]
    Empty,
}

/// The bytes of a decoded payload and the MIME type it was declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedData {
    mime_type: String,
    data: Vec<u8>,
}

impl DecodedData {
    /// Lowercased MIME type without parameters, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Decodes a `data:` URI into its bytes and MIME type.
///
/// Base64 payloads may contain whitespace and may omit padding. Payloads
/// without the `;base64` flag are percent-decoded.
///
/// # Examples
///
/// ```
/// # use layertree::decode::decode_href;
/// let decoded = decode_href("data:image/png;base64,iVBORw0K").unwrap();
/// assert_eq!(decoded.mime_type(), "image/png");
/// assert_eq!(&decoded.data()[1..4], b"PNG");
///
/// let decoded = decode_href("data:text/plain,a%20b").unwrap();
/// assert_eq!(decoded.data(), b"a b");
///
/// assert!(decode_href("picture.png").is_err());
/// ```
pub fn decode_href(href: &str) -> Result<DecodedData, DecodeError> {
    let href = href.trim();
    let rest = strip_prefix_ignore_case(href, "data:").ok_or(DecodeError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(DecodeError::MissingPayload)?;

    let mut params = header.split(';').map(str::trim);
    let mime_type = match params.next() {
        Some(mime_type) if !mime_type.is_empty() => mime_type.to_ascii_lowercase(),
        _ => DEFAULT_MIME_TYPE.to_string(),
    };
    let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        LENIENT_BASE64.decode(compact)?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    if data.is_empty() {
        return Err(DecodeError::Empty);
    }

    trace!(mime_type = mime_type.as_str(), bytes = data.len(); "Decoded data URI");
    Ok(DecodedData { mime_type, data })
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}
