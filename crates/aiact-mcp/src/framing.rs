// crates/aiact-mcp/src/framing.rs
// ============================================================================
// Module: Stdio Framing
// Description: Content-Length framed message reading and writing.
// Purpose: Enforce header and payload limits on the stdio transport.
// Dependencies: std::io, thiserror
// ============================================================================

//! ## Overview
//! Messages on the stdio transport are framed with a Content-Length header
//! section terminated by an empty line. Reading enforces a header-section
//! byte budget, rejects duplicate Content-Length headers, and enforces the
//! payload size limit before allocating the body.
//!
//! Invariants:
//! - Exactly one Content-Length header per frame.
//! - Header bytes and payload bytes are bounded independently.
//! - A clean EOF before any header byte is reported as `Eof`, not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default budget for one frame's header section, in bytes.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading a framed message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// The input ended before a complete frame.
    #[error("eof before complete frame")]
    Eof,
    /// The header section exceeded its byte budget.
    #[error("frame header section exceeds limit")]
    HeaderTooLarge,
    /// More than one Content-Length header appeared.
    #[error("duplicate content-length header")]
    DuplicateContentLength,
    /// No Content-Length header appeared.
    #[error("missing content-length header")]
    MissingContentLength,
    /// The Content-Length value was not a valid length.
    #[error("invalid content-length value")]
    InvalidContentLength,
    /// The declared payload exceeds the size limit.
    #[error("frame payload exceeds limit")]
    PayloadTooLarge,
    /// Reading from the underlying stream failed.
    #[error("frame read failed: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Reading
// ============================================================================

/// Reads one Content-Length framed payload.
///
/// Uses [`DEFAULT_MAX_HEADER_BYTES`] as the header budget.
///
/// # Errors
///
/// Returns [`FramingError`] on malformed frames, limit violations, or I/O
/// failure; [`FramingError::Eof`] signals a clean end of input.
pub fn read_framed(reader: &mut impl BufRead, max_payload: usize) -> Result<Vec<u8>, FramingError> {
    read_framed_with_limits(reader, max_payload, DEFAULT_MAX_HEADER_BYTES)
}

/// Reads one framed payload with an explicit header budget.
///
/// # Errors
///
/// Returns [`FramingError`] on malformed frames, limit violations, or I/O
/// failure; [`FramingError::Eof`] signals a clean end of input.
pub fn read_framed_with_limits(
    reader: &mut impl BufRead,
    max_payload: usize,
    max_header_bytes: usize,
) -> Result<Vec<u8>, FramingError> {
    let mut content_length: Option<usize> = None;
    let mut header_bytes = 0_usize;
    let mut first_line = true;

    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|err| FramingError::Io(err.to_string()))?;
        if read == 0 {
            if first_line && header_bytes == 0 {
                return Err(FramingError::Eof);
            }
            return Err(FramingError::Io("eof inside frame header".to_string()));
        }
        first_line = false;
        header_bytes = header_bytes.saturating_add(read);
        if header_bytes > max_header_bytes {
            return Err(FramingError::HeaderTooLarge);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        let Some((name, value)) = trimmed.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            if content_length.is_some() {
                return Err(FramingError::DuplicateContentLength);
            }
            let length = value
                .trim()
                .parse::<usize>()
                .map_err(|_| FramingError::InvalidContentLength)?;
            content_length = Some(length);
        }
    }

    let length = content_length.ok_or(FramingError::MissingContentLength)?;
    if length > max_payload {
        return Err(FramingError::PayloadTooLarge);
    }
    let mut payload = vec![0_u8; length];
    reader
        .read_exact(&mut payload)
        .map_err(|err| FramingError::Io(err.to_string()))?;
    Ok(payload)
}

// ============================================================================
// SECTION: Writing
// ============================================================================

/// Writes one Content-Length framed payload.
///
/// # Errors
///
/// Returns [`FramingError::Io`] when the underlying write fails.
pub fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), FramingError> {
    write!(writer, "Content-Length: {}\r\n\r\n", payload.len())
        .map_err(|err| FramingError::Io(err.to_string()))?;
    writer.write_all(payload).map_err(|err| FramingError::Io(err.to_string()))?;
    writer.flush().map_err(|err| FramingError::Io(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        reason = "Test-only framing assertions."
    )]

    use std::io::BufReader;
    use std::io::Cursor;

    use super::*;

    fn reader(frame: String) -> BufReader<Cursor<Vec<u8>>> {
        BufReader::new(Cursor::new(frame.into_bytes()))
    }

    #[test]
    fn read_framed_accepts_payload_at_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let result = read_framed(&mut reader(framed), payload.len());
        assert_eq!(result.expect("payload read"), payload);
    }

    #[test]
    fn read_framed_rejects_payload_over_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let result = read_framed(&mut reader(framed), payload.len() - 1);
        assert_eq!(result, Err(FramingError::PayloadTooLarge));
    }

    #[test]
    fn read_framed_rejects_oversized_headers() {
        let oversized = "x".repeat(9_000);
        let framed = format!("{oversized}\r\n\r\n");
        let result = read_framed(&mut reader(framed), 1024);
        assert_eq!(result, Err(FramingError::HeaderTooLarge));
    }

    #[test]
    fn read_framed_rejects_duplicate_content_length_headers() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\nContent-Length: {}\r\n\r\n{}",
            payload.len(),
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let result = read_framed(&mut reader(framed), payload.len());
        assert_eq!(result, Err(FramingError::DuplicateContentLength));
    }

    #[test]
    fn read_framed_rejects_missing_content_length() {
        let framed = "X-Other: 1\r\n\r\n".to_string();
        let result = read_framed(&mut reader(framed), 1024);
        assert_eq!(result, Err(FramingError::MissingContentLength));
    }

    #[test]
    fn read_framed_reports_clean_eof() {
        let result = read_framed(&mut reader(String::new()), 1024);
        assert_eq!(result, Err(FramingError::Eof));
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut out = Vec::new();
        write_framed(&mut out, br#"{"ok":true}"#).expect("write");
        let mut framed = BufReader::new(Cursor::new(out));
        let result = read_framed(&mut framed, 1024).expect("read");
        assert_eq!(result, br#"{"ok":true}"#);
    }
}
