//! Endian-aware integer extraction.

use crate::error::{HeaderError, Result};
use crate::ident::{BitClass, Endianness};
use crate::layout::{self, FieldSpan, FileLayout, SectionLayout};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Reads an unsigned integer of `width` bytes starting at `offset`.
///
/// `B` fixes the byte order: under [`LittleEndian`] the byte at `offset` is
/// the least significant one, under [`BigEndian`] the most significant one.
///
/// # Panics
///
/// Panics if `width` is not 1, 2, 4 or 8, or if `offset + width` runs past the
/// end of `buffer`. Both are caller bugs, not malformed input.
pub fn read<B: ByteOrder>(buffer: &[u8], offset: usize, width: usize) -> u64 {
    let bytes = &buffer[offset..offset + width];
    match width {
        1 => u64::from(bytes[0]),
        2 => u64::from(B::read_u16(bytes)),
        4 => u64::from(B::read_u32(bytes)),
        8 => B::read_u64(bytes),
        _ => panic!("unsupported integer width {width}"),
    }
}

/// A bit class and byte order that are both known.
///
/// Holding an `Encoding` is the only way to perform multi-byte reads, so the
/// "class or endianness unknown" case is handled once, when it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    bit_class: BitClass,
    endianness: Endianness,
    file: &'static FileLayout,
    section: &'static SectionLayout,
    section_size: usize,
}

impl Encoding {
    pub fn new(bit_class: BitClass, endianness: Endianness) -> Result<Self> {
        let file = layout::file_layout(bit_class);
        let section = layout::section_layout(bit_class);
        let section_size = layout::section_header_size(bit_class);
        let (Some(file), Some(section), Some(section_size)) = (file, section, section_size) else {
            return Err(HeaderError::UnknownClass(bit_class.raw()));
        };
        if let Endianness::Unknown(raw) = endianness {
            return Err(HeaderError::UnknownEndianness(raw));
        }
        log::trace!("resolved encoding {bit_class} {endianness}");

        Ok(Self {
            bit_class,
            endianness,
            file,
            section,
            section_size,
        })
    }

    pub fn bit_class(&self) -> BitClass {
        self.bit_class
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn is_64(&self) -> bool {
        self.bit_class == BitClass::SixtyFour
    }

    pub fn file_layout(&self) -> &'static FileLayout {
        self.file
    }

    pub fn section_layout(&self) -> &'static SectionLayout {
        self.section
    }

    /// Bytes one section header occupies under this encoding.
    pub fn section_header_size(&self) -> usize {
        self.section_size
    }

    /// Reads the integer stored at `span` in this encoding's byte order.
    pub fn read(&self, buffer: &[u8], span: FieldSpan) -> u64 {
        match self.endianness {
            Endianness::Big => read::<BigEndian>(buffer, span.offset, span.size),
            _ => read::<LittleEndian>(buffer, span.offset, span.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_decides_significance() {
        let bytes = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(read::<LittleEndian>(&bytes, 0, 4), 0x1234_5678);
        assert_eq!(read::<BigEndian>(&bytes, 0, 4), 0x7856_3412);
    }

    #[test]
    fn every_supported_width() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];

        assert_eq!(read::<LittleEndian>(&data, 0, 1), 0x12);
        assert_eq!(read::<LittleEndian>(&data, 0, 2), 0x3412);
        assert_eq!(read::<LittleEndian>(&data, 0, 8), 0xf0de_bc9a_7856_3412);

        assert_eq!(read::<BigEndian>(&data, 7, 1), 0xf0);
        assert_eq!(read::<BigEndian>(&data, 2, 2), 0x5678);
        assert_eq!(read::<BigEndian>(&data, 0, 8), 0x1234_5678_9abc_def0);
    }

    #[test]
    #[should_panic]
    fn read_past_end_panics() {
        let data = [0u8; 6];
        read::<LittleEndian>(&data, 4, 4);
    }

    #[test]
    #[should_panic(expected = "unsupported integer width")]
    fn odd_width_panics() {
        let data = [0u8; 8];
        read::<BigEndian>(&data, 0, 3);
    }

    #[test]
    fn encoding_rejects_unknown_variants() {
        assert_eq!(
            Encoding::new(BitClass::Unknown(9), Endianness::Little),
            Err(HeaderError::UnknownClass(9))
        );
        assert_eq!(
            Encoding::new(BitClass::SixtyFour, Endianness::Unknown(0)),
            Err(HeaderError::UnknownEndianness(0))
        );
    }

    #[test]
    fn encoding_selects_tables_once() {
        let narrow = Encoding::new(BitClass::ThirtyTwo, Endianness::Big).unwrap();
        let wide = Encoding::new(BitClass::SixtyFour, Endianness::Little).unwrap();

        assert!(std::ptr::eq(narrow.file_layout(), &layout::FILE_LAYOUT_32));
        assert!(std::ptr::eq(wide.section_layout(), &layout::SECTION_LAYOUT_64));
        assert_eq!(narrow.section_header_size(), 40);
        assert_eq!(wide.section_header_size(), 64);
        assert!(!narrow.is_64());
        assert!(wide.is_64());
    }

    #[test]
    fn section_header_size_is_resolved_with_the_encoding() {
        for class in [BitClass::ThirtyTwo, BitClass::SixtyFour] {
            for order in [Endianness::Little, Endianness::Big] {
                let encoding = Encoding::new(class, order).unwrap();
                assert_eq!(
                    Some(encoding.section_header_size()),
                    layout::section_header_size(class)
                );
                assert_eq!(encoding, Encoding::new(class, order).unwrap());
            }
        }
    }

    #[test]
    fn encoding_reads_in_declared_order() {
        let bytes = [0x78, 0x56, 0x34, 0x12];
        let span = FieldSpan::new(0, 4);
        let little = Encoding::new(BitClass::ThirtyTwo, Endianness::Little).unwrap();
        let big = Encoding::new(BitClass::ThirtyTwo, Endianness::Big).unwrap();
        assert_eq!(little.read(&bytes, span), 0x1234_5678);
        assert_eq!(big.read(&bytes, span), 0x7856_3412);
    }
}
