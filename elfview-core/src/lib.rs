//! Typed, read-only access to ELF file and section headers.
//!
//! The caller owns the bytes; views borrow them, resolve the file's class and
//! byte order once, and decode every other field on demand.

pub mod decode;
pub mod error;
pub mod header;
pub mod ident;
pub mod layout;
pub mod machine;
pub mod sections;

pub use decode::Encoding;
pub use error::{HeaderError, Result};
pub use header::file::{FileHeaderSummary, FileHeaderView};
pub use header::section::{SectionHeaderSummary, SectionHeaderView};
pub use header::Header;
pub use ident::*;
pub use layout::{FieldSpan, FileField, SectionField, FILE_HEADER_SIZE};
pub use machine::Machine;
pub use sections::{SectionFlags, SectionType};
