// src/services/font.rs
// A small stroke font for writing text into a program
//
// Glyph coordinates are in font units: x in -1/2..1/2, y in -1..1, y up.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphStep {
    To { x: f32, y: f32 },
    /// Lift the pen before the next segment.
    Lift,
}

use GlyphStep::{Lift, To};

const fn to(x: f32, y: f32) -> GlyphStep {
    To { x, y }
}

const GLYPH_A: &[GlyphStep] = &[
    to(-0.5, -1.0),
    to(-0.5, 0.5),
    to(-0.25, 1.0),
    to(0.25, 1.0),
    to(0.5, 0.5),
    to(0.5, -1.0),
    Lift,
    to(-0.5, 0.0),
    to(0.5, 0.0),
];

const GLYPH_B: &[GlyphStep] = &[
    to(-0.5, -1.0),
    to(-0.5, 1.0),
    to(0.25, 1.0),
    to(0.5, 0.5),
    to(0.25, 0.0),
    to(-0.5, 0.0),
    Lift,
    to(0.25, 0.0),
    to(0.5, -0.5),
    to(0.25, -1.0),
    to(-0.5, -1.0),
];

const GLYPH_C: &[GlyphStep] = &[
    to(0.5, 2.0 / 3.0),
    to(0.0, 1.0),
    to(-0.5, 2.0 / 3.0),
    to(-0.5, -2.0 / 3.0),
    to(0.0, -1.0),
    to(0.5, -2.0 / 3.0),
];

/// Steps for `c`, or `None` when the font has no glyph for it.
/// Space is a glyph with no steps.
pub fn glyph(c: char) -> Option<&'static [GlyphStep]> {
    match c {
        'A' => Some(GLYPH_A),
        'B' => Some(GLYPH_B),
        'C' => Some(GLYPH_C),
        ' ' => Some(&[]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_glyphs() {
        assert_eq!(glyph('A').map(<[GlyphStep]>::len), Some(9));
        assert_eq!(glyph('B').map(<[GlyphStep]>::len), Some(11));
        assert_eq!(glyph('C').map(<[GlyphStep]>::len), Some(6));
        assert_eq!(glyph(' '), Some(&[][..]));
        assert_eq!(glyph('z'), None);
    }

    #[test]
    fn test_glyphs_stay_in_font_box() {
        for c in ['A', 'B', 'C'] {
            for step in glyph(c).unwrap() {
                if let To { x, y } = *step {
                    assert!((-0.5..=0.5).contains(&x), "x out of box in '{}'", c);
                    assert!((-1.0..=1.0).contains(&y), "y out of box in '{}'", c);
                }
            }
        }
    }

    #[test]
    fn test_glyphs_never_start_or_end_lifted() {
        for c in ['A', 'B', 'C'] {
            let steps = glyph(c).unwrap();
            assert_ne!(steps.first(), Some(&Lift));
            assert_ne!(steps.last(), Some(&Lift));
        }
    }
}
