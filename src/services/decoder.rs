// src/services/decoder.rs
// Decodes one program payload: base64 -> zlib -> fixed-size record -> path

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;
use thiserror::Error;
use tracing::debug;

use crate::models::{CoordinatePath, Point, DECODED_SIZE, HEADER_SIZE, POINT_SIZE};

pub const TERMINATOR: char = ';';

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("payload is not a valid zlib stream: {0}")]
    InvalidCompression(#[source] std::io::Error),
    #[error("decoded record is {actual} bytes, expected {}", DECODED_SIZE)]
    UnexpectedSize { actual: usize },
    #[error("record declares {declared} points, which runs past the end of the record")]
    TruncatedPath { declared: u32 },
}

/// Number of `=` characters that bring `len` up to a multiple of four.
pub fn padding_needed(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Pads a base64 payload to a multiple of four bytes.
pub fn repair_padding(payload: &[u8]) -> Vec<u8> {
    let mut padded = Vec::with_capacity(payload.len() + 3);
    padded.extend_from_slice(payload);
    padded.resize(payload.len() + padding_needed(payload.len()), b'=');
    padded
}

/// Strips one trailing terminator and the line wrapping exports put inside
/// the payload.
fn clean_payload(text: &str) -> Vec<u8> {
    let text = text.trim();
    let text = text.strip_suffix(TERMINATOR).unwrap_or(text);
    text.bytes().filter(|b| !b.is_ascii_whitespace()).collect()
}

/// Decodes the text of a single program into its coordinate path.
pub fn decode_program(text: &str) -> Result<CoordinatePath, DecodeError> {
    let padded = repair_padding(&clean_payload(text));
    let compressed = STANDARD.decode(&padded)?;
    let record = inflate(&compressed)?;
    debug!(
        "Decoded {} base64 bytes into a {} byte record",
        padded.len(),
        record.len()
    );
    parse_record(&record)
}

/// Inflates a zlib stream, reading at most one byte past a full record so an
/// oversized stream is caught without inflating all of it.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let decoder = ZlibDecoder::new(compressed);
    let mut record = Vec::with_capacity(DECODED_SIZE);
    decoder
        .take(DECODED_SIZE as u64 + 1)
        .read_to_end(&mut record)
        .map_err(DecodeError::InvalidCompression)?;
    Ok(record)
}

/// Reads the header and the declared number of points from a record.
pub fn parse_record(record: &[u8]) -> Result<CoordinatePath, DecodeError> {
    if record.len() != DECODED_SIZE {
        return Err(DecodeError::UnexpectedSize {
            actual: record.len(),
        });
    }

    let declared = LittleEndian::read_u32(&record[..HEADER_SIZE]);
    let end = (declared as usize)
        .checked_mul(POINT_SIZE)
        .and_then(|len| len.checked_add(HEADER_SIZE))
        .filter(|&end| end <= DECODED_SIZE)
        .ok_or(DecodeError::TruncatedPath { declared })?;

    Ok(record[HEADER_SIZE..end]
        .chunks_exact(POINT_SIZE)
        .map(|pair| {
            Point::new(
                LittleEndian::read_u16(&pair[0..2]),
                LittleEndian::read_u16(&pair[2..4]),
            )
        })
        .collect())
}
