// src/services/encoder.rs
// Builds program payloads: path -> fixed-size record -> zlib -> base64
// Also lays out text with the stroke font so it can be encoded.

use std::io::Write;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::debug;

use super::decoder::TERMINATOR;
use super::font::{glyph, GlyphStep};
use crate::models::{
    CoordinatePath, Point, DECODED_SIZE, HEADER_SIZE, MAX_POINTS, POINT_SIZE,
};

/// Longest text that fits on the two lines of the layout.
pub const MAX_TEXT_LEN: usize = 26;

// Text is laid out in a design space with the proportions of a comment tile
const DESIGN_WIDTH: f32 = 420.0;
const DESIGN_HEIGHT: f32 = 140.0;
const FONT_SIZE: f32 = 16.0;
const KERNING: f32 = 16.0;
const LINE_HEIGHT: f32 = 1.25;
const CHARS_PER_LINE: usize = 13;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("path has {count} points, a program holds at most {}", MAX_POINTS)]
    TooManyPoints { count: usize },
    #[error("no glyph for character '{0}'")]
    UnsupportedCharacter(char),
    #[error("text is {len} characters, at most {} fit", MAX_TEXT_LEN)]
    TextTooLong { len: usize },
    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

/// Lays out a path as a program record.
pub fn encode_buffer(path: &CoordinatePath) -> Result<[u8; DECODED_SIZE], EncodeError> {
    if path.len() > MAX_POINTS {
        return Err(EncodeError::TooManyPoints { count: path.len() });
    }

    let mut record = [0u8; DECODED_SIZE];
    LittleEndian::write_u32(&mut record[..HEADER_SIZE], path.len() as u32);
    for (point, slot) in path
        .iter()
        .zip(record[HEADER_SIZE..].chunks_exact_mut(POINT_SIZE))
    {
        LittleEndian::write_u16(&mut slot[0..2], point.x);
        LittleEndian::write_u16(&mut slot[2..4], point.y);
    }
    Ok(record)
}

/// Encodes a path the way the game exports it: unpadded base64 ending in `;`.
pub fn encode_path(path: &CoordinatePath) -> Result<String, EncodeError> {
    let record = encode_buffer(path)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&record)?;
    let compressed = encoder.finish()?;
    debug!(
        "Compressed {} points into {} bytes",
        path.len(),
        compressed.len()
    );

    let mut text = STANDARD_NO_PAD.encode(compressed);
    text.push(TERMINATOR);
    Ok(text)
}

/// Maps a design-space value onto the 0..=65535 program range. The +1 keeps
/// drawn points off the pen-up sentinel.
fn to_program(value: i32, design_max: f32) -> u16 {
    let scaled = (value as f32 / design_max) * u16::MAX as f32 + 1.0;
    scaled.round().clamp(0.0, u16::MAX as f32) as u16
}

/// Writes `text` with the stroke font. Up to 13 characters sit on one
/// centred line, longer text wraps onto a second line.
pub fn encode_text(text: &str) -> Result<CoordinatePath, EncodeError> {
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(EncodeError::TextTooLong { len });
    }

    let mut path = CoordinatePath::default();
    for (n, c) in text.chars().enumerate() {
        let steps = glyph(c).ok_or(EncodeError::UnsupportedCharacter(c))?;

        let column = (n % CHARS_PER_LINE) as f32;
        let origin_x = FONT_SIZE * (column + 1.0) + KERNING * column;
        let origin_y = if len <= CHARS_PER_LINE {
            DESIGN_HEIGHT / 2.0
        } else {
            let line = (n / CHARS_PER_LINE) as f32;
            DESIGN_HEIGHT / 3.0 + DESIGN_HEIGHT / 3.0 * line * LINE_HEIGHT
        };

        for step in steps {
            match *step {
                GlyphStep::Lift => path.push(Point::PEN_UP),
                GlyphStep::To { x, y } => {
                    // design space has y down, the font has y up
                    let design_x = (origin_x + x * FONT_SIZE) as i32;
                    let design_y = (origin_y - y * FONT_SIZE) as i32;
                    path.push(Point::new(
                        to_program(design_x, DESIGN_WIDTH),
                        to_program(design_y, DESIGN_HEIGHT),
                    ));
                }
            }
        }

        if path.last().is_some_and(|last| !last.is_pen_up()) {
            path.push(Point::PEN_UP);
        }
    }

    if path.len() > MAX_POINTS {
        return Err(EncodeError::TooManyPoints { count: path.len() });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PenState;
    use crate::services::decoder::{decode_program, parse_record};
    use rand::Rng;

    fn random_path(rng: &mut impl Rng, len: usize) -> CoordinatePath {
        (0..len)
            .map(|_| {
                // keep some sentinels in the mix
                if rng.gen_bool(0.1) {
                    Point::PEN_UP
                } else {
                    Point::new(rng.gen(), rng.gen())
                }
            })
            .collect()
    }

    #[test]
    fn test_buffer_layout() {
        let path: CoordinatePath = vec![Point::new(0x0102, 0x0304), Point::PEN_UP].into();
        let record = encode_buffer(&path).unwrap();

        assert_eq!(&record[..4], &[2, 0, 0, 0]);
        assert_eq!(&record[4..8], &[0x02, 0x01, 0x04, 0x03]);
        assert_eq!(&record[8..12], &[0, 0, 0, 0]);
        assert!(record[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_round_trip_every_length() {
        let mut rng = rand::thread_rng();
        for len in 0..=MAX_POINTS {
            let path = random_path(&mut rng, len);
            let encoded = encode_path(&path).unwrap();

            assert!(encoded.ends_with(';'));
            assert!(!encoded.contains('='));
            let decoded = decode_program(&encoded).unwrap();
            assert_eq!(decoded, path, "Failed for length {}", len);
        }
    }

    #[test]
    fn test_buffer_round_trip_without_compression() {
        let mut rng = rand::thread_rng();
        let path = random_path(&mut rng, 100);
        let record = encode_buffer(&path).unwrap();
        assert_eq!(parse_record(&record).unwrap(), path);
    }

    #[test]
    fn test_too_many_points() {
        let path: CoordinatePath = vec![Point::new(1, 1); MAX_POINTS + 1].into();
        assert!(matches!(
            encode_path(&path),
            Err(EncodeError::TooManyPoints { count: 257 })
        ));
    }

    #[test]
    fn test_text_glyph_separated_by_pen_up() {
        let path = encode_text("A").unwrap();

        // 8 drawn points, the divider inside the glyph, the trailing lift
        assert_eq!(path.len(), 10);
        let states: Vec<PenState> = path.pen_states().collect();
        assert_eq!(states[6], PenState::Up);
        assert_eq!(states[9], PenState::Up);
        assert_eq!(states.iter().filter(|s| **s == PenState::Up).count(), 2);
    }

    #[test]
    fn test_text_first_point_position() {
        let path = encode_text("A").unwrap();
        // origin (16, 70), first step (-1/2, -1) -> design (8, 86)
        let expected = Point::new(to_program(8, DESIGN_WIDTH), to_program(86, DESIGN_HEIGHT));
        assert_eq!(path.points()[0], expected);
        assert_eq!(expected, Point::new(1249, 40258));
    }

    #[test]
    fn test_text_points_never_hit_sentinel() {
        let path = encode_text("ABC CBA").unwrap();
        let drawn = path.iter().filter(|p| !p.is_pen_up()).count();
        // 8 + 10 + 6 points per glyph, twice
        assert_eq!(drawn, 48);
        assert!(path.iter().all(|p| p.is_pen_up() || (p.x > 0 && p.y > 0)));
    }

    #[test]
    fn test_leading_space_adds_nothing() {
        let spaced = encode_text(" C").unwrap();
        let plain = encode_text("C").unwrap();
        assert_eq!(spaced.len(), plain.len());
    }

    #[test]
    fn test_long_text_wraps_to_second_line() {
        let path = encode_text("CCCCCCCCCCCCCC").unwrap();
        let strokes = path.strokes();
        assert_eq!(strokes.len(), 14);
        assert!(strokes[13][0].y > strokes[0][0].y);
        // the wrapped glyph starts back at the first column
        assert_eq!(strokes[13][0].x, strokes[0][0].x);
    }

    #[test]
    fn test_text_errors() {
        assert!(matches!(
            encode_text("Z"),
            Err(EncodeError::UnsupportedCharacter('Z'))
        ));
        let long = "A".repeat(MAX_TEXT_LEN + 1);
        assert!(matches!(
            encode_text(&long),
            Err(EncodeError::TextTooLong { len: 27 })
        ));
    }

    #[test]
    fn test_encoded_text_decodes() {
        let path = encode_text("CAB").unwrap();
        let decoded = decode_program(&encode_path(&path).unwrap()).unwrap();
        assert_eq!(decoded, path);
    }
}
