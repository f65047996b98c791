pub mod decoder;
pub mod encoder;
pub mod font;
pub mod program_file;

pub use decoder::{decode_program, DecodeError};
pub use encoder::{encode_path, encode_text, EncodeError};
pub use program_file::{Paths, ProgramFile, ProgramUnit, UnitKind, Units};
