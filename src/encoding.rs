//! Encoding detection and transcoding using chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    simdutf8::basic::from_utf8(data).is_ok()
}

/// Check if the bytes are valid UTF-8 up to a possibly truncated final
/// character, as happens when sniffing a fixed-size prefix of a file.
pub fn is_utf8_prefix(data: &[u8]) -> bool {
    match simdutf8::compat::from_utf8(data) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Information about the detected encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingInfo {
    /// The detected encoding.
    pub encoding: &'static Encoding,
    /// Whether a byte order mark was present.
    pub has_bom: bool,
}

impl EncodingInfo {
    /// Create a new `EncodingInfo`.
    pub const fn new(encoding: &'static Encoding, has_bom: bool) -> Self {
        Self { encoding, has_bom }
    }

    /// WHATWG name of the encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Whether the data is UTF-8 and can be read without transcoding.
    pub fn is_utf8(&self) -> bool {
        self.encoding == UTF_8
    }

    /// Length of the byte order mark to skip.
    pub fn bom_len(&self) -> usize {
        match (self.has_bom, self.is_utf8()) {
            (false, _) => 0,
            (true, true) => 3,
            (true, false) => 2,
        }
    }
}

/// Detect the encoding of a sample of data.
///
/// Byte order marks win; otherwise valid UTF-8 is taken as is, and anything
/// else is guessed by chardetng (Windows-1252, ISO-8859 variants, ...).
pub fn detect_encoding(sample: &[u8]) -> EncodingInfo {
    if sample.starts_with(&[0xFF, 0xFE]) {
        return EncodingInfo::new(UTF_16LE, true);
    }
    if sample.starts_with(&[0xFE, 0xFF]) {
        return EncodingInfo::new(UTF_16BE, true);
    }
    if has_utf8_bom(sample) {
        return EncodingInfo::new(UTF_8, true);
    }
    if is_utf8_prefix(sample) {
        return EncodingInfo::new(UTF_8, false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    EncodingInfo::new(detector.guess(None, true), false)
}

/// Decode bytes to text, transcoding to UTF-8 when needed.
///
/// Returns the text and the detected encoding. UTF-8 input without a BOM
/// is borrowed; invalid sequences become U+FFFD.
pub fn decode_to_string(data: &[u8]) -> (Cow<'_, str>, EncodingInfo) {
    let info = detect_encoding(data);
    let body = &data[info.bom_len()..];

    if info.is_utf8() {
        return (String::from_utf8_lossy(body), info);
    }

    let (decoded, _) = info.encoding.decode_without_bom_handling(body);
    (decoded, info)
}
