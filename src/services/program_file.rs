// src/services/program_file.rs
// Splits a program file into encoded units and decodes them lazily, one at a time
//
// Two layouts are understood:
//   * program exports, where each drawing follows a `DEFINE COMMENT n` or
//     `DEFINE LABEL n` line and ends with `;`
//   * bare files holding one or more `;`-terminated payloads

use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::decoder::{decode_program, DecodeError, TERMINATOR};
use crate::models::CoordinatePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Comment(u32),
    Label(u32),
    /// Position of the payload in a bare file.
    Bare(usize),
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Comment(index) => write!(f, "comment-{}", index),
            UnitKind::Label(index) => write!(f, "label-{}", index),
            UnitKind::Bare(ordinal) => write!(f, "program-{}", ordinal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramUnit<'a> {
    pub kind: UnitKind,
    pub payload: &'a str,
}

impl ProgramUnit<'_> {
    pub fn decode(&self) -> Result<CoordinatePath, DecodeError> {
        decode_program(self.payload)
    }
}

fn define_block() -> &'static Regex {
    static DEFINE_BLOCK: OnceLock<Regex> = OnceLock::new();
    DEFINE_BLOCK.get_or_init(|| {
        Regex::new(r"DEFINE\s+(COMMENT|LABEL)\s+(\d{1,9})\s+([^;]*);?")
            .expect("define block pattern is valid")
    })
}

/// Where the next unit starts. Shared by the borrowing and owning iterators.
#[derive(Debug, Clone)]
struct Cursor {
    offset: usize,
    ordinal: usize,
    exported: bool,
}

impl Cursor {
    fn new(source: &str) -> Self {
        Self {
            offset: 0,
            ordinal: 0,
            exported: define_block().is_match(source),
        }
    }

    fn advance<'s>(&mut self, source: &'s str) -> Option<ProgramUnit<'s>> {
        if self.exported {
            self.next_block(source)
        } else {
            self.next_bare(source)
        }
    }

    fn next_block<'s>(&mut self, source: &'s str) -> Option<ProgramUnit<'s>> {
        let caps = define_block().captures_at(source, self.offset)?;
        self.offset = caps.get(0)?.end();

        let index = caps[2].parse().unwrap_or_default();
        let kind = match &caps[1] {
            "COMMENT" => UnitKind::Comment(index),
            _ => UnitKind::Label(index),
        };
        Some(ProgramUnit {
            kind,
            payload: caps.get(3)?.as_str(),
        })
    }

    fn next_bare<'s>(&mut self, source: &'s str) -> Option<ProgramUnit<'s>> {
        while self.offset < source.len() {
            let rest = &source[self.offset..];
            let (piece, consumed) = match rest.find(TERMINATOR) {
                Some(end) => (&rest[..end], end + TERMINATOR.len_utf8()),
                None => (rest, rest.len()),
            };
            self.offset += consumed;

            if piece.trim().is_empty() {
                continue;
            }
            let kind = UnitKind::Bare(self.ordinal);
            self.ordinal += 1;
            return Some(ProgramUnit {
                kind,
                payload: piece,
            });
        }
        None
    }
}

/// The encoded units of a file, in file order.
pub struct Units<'a> {
    source: &'a str,
    cursor: Cursor,
}

impl<'a> Iterator for Units<'a> {
    type Item = ProgramUnit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance(self.source)
    }
}

/// Decoded paths of a file, decoded one unit per call to `next`.
pub struct Paths<S> {
    source: S,
    cursor: Cursor,
    current: Option<UnitKind>,
}

impl<S: AsRef<str>> Paths<S> {
    fn new(source: S) -> Self {
        let cursor = Cursor::new(source.as_ref());
        Self {
            source,
            cursor,
            current: None,
        }
    }

    /// Kind of the unit most recently yielded.
    pub fn current_kind(&self) -> Option<UnitKind> {
        self.current
    }
}

impl<S: AsRef<str>> Iterator for Paths<S> {
    type Item = Result<CoordinatePath, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = self.cursor.advance(self.source.as_ref())?;
        self.current = Some(unit.kind);
        Some(unit.decode())
    }
}

#[derive(Debug, Clone)]
pub struct ProgramFile {
    source: String,
}

impl ProgramFile {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::new(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn units(&self) -> Units<'_> {
        Units {
            source: &self.source,
            cursor: Cursor::new(&self.source),
        }
    }

    pub fn paths(&self) -> Paths<&str> {
        Paths::new(self.source.as_str())
    }

    pub fn into_paths(self) -> Paths<String> {
        Paths::new(self.source)
    }
}
