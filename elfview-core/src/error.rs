use thiserror::Error;

/// Errors raised while building a header view or reading through one.
///
/// Unrecognised enumerated values are never errors; they classify as an
/// `Unknown(raw)` variant instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The buffer handed to a view is shorter than the header it describes.
    #[error("header truncated: needed {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    /// `EI_CLASS` holds neither `ELFCLASS32` nor `ELFCLASS64`.
    #[error("unknown ELF class byte {0:#04x}")]
    UnknownClass(u8),

    /// `EI_DATA` holds neither `ELFDATA2LSB` nor `ELFDATA2MSB`.
    #[error("unknown ELF data encoding byte {0:#04x}")]
    UnknownEndianness(u8),

    /// The field is a byte range (`ei_mag`, `ei_pad`), not an integer.
    #[error("field {0} is not an integer")]
    NotAnInteger(&'static str),
}

pub type Result<T> = std::result::Result<T, HeaderError>;
