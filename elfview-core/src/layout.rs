//! Byte layout of the ELF file header and section header.
//!
//! Each header is described by a closed field enum. The `(ELF32, ELF64)` span
//! of every field comes from one exhaustive `match`, and the four lookup
//! tables below are materialised from it at compile time, so a new field
//! cannot be added without giving it a layout for both classes.

use crate::ident::BitClass;
use std::ops::Range;

/// Size of the buffer a file-header view requires, whatever the class.
pub const FILE_HEADER_SIZE: usize = 0x40;

/// Location of one field inside a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpan {
    pub offset: usize,
    pub size: usize,
}

impl FieldSpan {
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// First byte past the field.
    pub const fn end(self) -> usize {
        self.offset + self.size
    }

    pub fn range(self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn overlaps(self, other: FieldSpan) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

const fn fixed(offset: usize, size: usize) -> (FieldSpan, FieldSpan) {
    (FieldSpan::new(offset, size), FieldSpan::new(offset, size))
}

const fn split(
    offset32: usize,
    offset64: usize,
    size32: usize,
    size64: usize,
) -> (FieldSpan, FieldSpan) {
    (FieldSpan::new(offset32, size32), FieldSpan::new(offset64, size64))
}

/// Fields of the ELF file header (`ElfN_Ehdr`), including `e_ident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileField {
    Magic,
    Class,
    Data,
    IdentVersion,
    OsAbi,
    AbiVersion,
    Padding,
    Type,
    Machine,
    Version,
    Entry,
    ProgramHeaderOffset,
    SectionHeaderOffset,
    Flags,
    HeaderSize,
    ProgramHeaderEntrySize,
    ProgramHeaderCount,
    SectionHeaderEntrySize,
    SectionHeaderCount,
    SectionNameTableIndex,
}

impl FileField {
    pub const COUNT: usize = 20;

    /// Every field, in declaration order (`ALL[i] as usize == i`).
    pub const ALL: [FileField; Self::COUNT] = [
        FileField::Magic,
        FileField::Class,
        FileField::Data,
        FileField::IdentVersion,
        FileField::OsAbi,
        FileField::AbiVersion,
        FileField::Padding,
        FileField::Type,
        FileField::Machine,
        FileField::Version,
        FileField::Entry,
        FileField::ProgramHeaderOffset,
        FileField::SectionHeaderOffset,
        FileField::Flags,
        FileField::HeaderSize,
        FileField::ProgramHeaderEntrySize,
        FileField::ProgramHeaderCount,
        FileField::SectionHeaderEntrySize,
        FileField::SectionHeaderCount,
        FileField::SectionNameTableIndex,
    ];

    const fn spans(self) -> (FieldSpan, FieldSpan) {
        match self {
            FileField::Magic => fixed(0x00, 4),
            FileField::Class => fixed(0x04, 1),
            FileField::Data => fixed(0x05, 1),
            FileField::IdentVersion => fixed(0x06, 1),
            FileField::OsAbi => fixed(0x07, 1),
            FileField::AbiVersion => fixed(0x08, 1),
            FileField::Padding => fixed(0x09, 7),
            FileField::Type => fixed(0x10, 2),
            FileField::Machine => fixed(0x12, 2),
            FileField::Version => fixed(0x14, 4),
            FileField::Entry => split(0x18, 0x18, 4, 8),
            FileField::ProgramHeaderOffset => split(0x1C, 0x20, 4, 8),
            FileField::SectionHeaderOffset => split(0x20, 0x28, 4, 8),
            FileField::Flags => split(0x24, 0x30, 4, 4),
            FileField::HeaderSize => split(0x28, 0x34, 2, 2),
            FileField::ProgramHeaderEntrySize => split(0x2A, 0x36, 2, 2),
            FileField::ProgramHeaderCount => split(0x2C, 0x38, 2, 2),
            FileField::SectionHeaderEntrySize => split(0x2E, 0x3A, 2, 2),
            FileField::SectionHeaderCount => split(0x30, 0x3C, 2, 2),
            FileField::SectionNameTableIndex => split(0x32, 0x3E, 2, 2),
        }
    }

    /// Offset of a single-byte `e_ident` field. These sit at the same place in
    /// both classes, so they can be read before the class is known.
    pub fn ident_offset(self) -> Option<usize> {
        match self {
            FileField::Class
            | FileField::Data
            | FileField::IdentVersion
            | FileField::OsAbi
            | FileField::AbiVersion => Some(FILE_LAYOUT_32[self as usize].offset),
            _ => None,
        }
    }

    /// True for fields that are byte ranges rather than integers.
    pub fn is_byte_range(self) -> bool {
        matches!(self, FileField::Magic | FileField::Padding)
    }

    pub fn span(self, class: BitClass) -> Option<FieldSpan> {
        file_layout(class).map(|table| table[self as usize])
    }

    /// Span shared by both classes, or `None` if the field moves with the class.
    pub fn fixed_span(self) -> Option<FieldSpan> {
        let (narrow, wide) = self.spans();
        (narrow == wide).then_some(narrow)
    }

    pub fn offset(self, class: BitClass) -> Option<usize> {
        self.span(class).map(|span| span.offset)
    }

    pub fn size(self, class: BitClass) -> Option<usize> {
        self.span(class).map(|span| span.size)
    }

    /// Name used by the ELF specification.
    pub fn name(self) -> &'static str {
        match self {
            FileField::Magic => "ei_mag",
            FileField::Class => "ei_class",
            FileField::Data => "ei_data",
            FileField::IdentVersion => "ei_version",
            FileField::OsAbi => "ei_osabi",
            FileField::AbiVersion => "ei_abiversion",
            FileField::Padding => "ei_pad",
            FileField::Type => "e_type",
            FileField::Machine => "e_machine",
            FileField::Version => "e_version",
            FileField::Entry => "e_entry",
            FileField::ProgramHeaderOffset => "e_phoff",
            FileField::SectionHeaderOffset => "e_shoff",
            FileField::Flags => "e_flags",
            FileField::HeaderSize => "e_ehsize",
            FileField::ProgramHeaderEntrySize => "e_phentsize",
            FileField::ProgramHeaderCount => "e_phnum",
            FileField::SectionHeaderEntrySize => "e_shentsize",
            FileField::SectionHeaderCount => "e_shnum",
            FileField::SectionNameTableIndex => "e_shstrndx",
        }
    }
}

/// Fields of one section header (`ElfN_Shdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Name,
    Type,
    Flags,
    Address,
    Offset,
    Size,
    Link,
    Info,
    AddressAlignment,
    EntrySize,
}

impl SectionField {
    pub const COUNT: usize = 10;

    /// Every field, in declaration order (`ALL[i] as usize == i`).
    pub const ALL: [SectionField; Self::COUNT] = [
        SectionField::Name,
        SectionField::Type,
        SectionField::Flags,
        SectionField::Address,
        SectionField::Offset,
        SectionField::Size,
        SectionField::Link,
        SectionField::Info,
        SectionField::AddressAlignment,
        SectionField::EntrySize,
    ];

    const fn spans(self) -> (FieldSpan, FieldSpan) {
        match self {
            SectionField::Name => fixed(0x00, 4),
            SectionField::Type => fixed(0x04, 4),
            SectionField::Flags => split(0x08, 0x08, 4, 8),
            SectionField::Address => split(0x0C, 0x10, 4, 8),
            SectionField::Offset => split(0x10, 0x18, 4, 8),
            SectionField::Size => split(0x14, 0x20, 4, 8),
            SectionField::Link => split(0x18, 0x28, 4, 4),
            SectionField::Info => split(0x1C, 0x2C, 4, 4),
            SectionField::AddressAlignment => split(0x20, 0x30, 4, 8),
            SectionField::EntrySize => split(0x24, 0x38, 4, 8),
        }
    }

    pub fn span(self, class: BitClass) -> Option<FieldSpan> {
        section_layout(class).map(|table| table[self as usize])
    }

    pub fn offset(self, class: BitClass) -> Option<usize> {
        self.span(class).map(|span| span.offset)
    }

    pub fn size(self, class: BitClass) -> Option<usize> {
        self.span(class).map(|span| span.size)
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionField::Name => "sh_name",
            SectionField::Type => "sh_type",
            SectionField::Flags => "sh_flags",
            SectionField::Address => "sh_addr",
            SectionField::Offset => "sh_offset",
            SectionField::Size => "sh_size",
            SectionField::Link => "sh_link",
            SectionField::Info => "sh_info",
            SectionField::AddressAlignment => "sh_addralign",
            SectionField::EntrySize => "sh_entsize",
        }
    }
}

pub type FileLayout = [FieldSpan; FileField::COUNT];
pub type SectionLayout = [FieldSpan; SectionField::COUNT];

const fn file_table(wide: bool) -> FileLayout {
    let mut table = [FieldSpan::new(0, 0); FileField::COUNT];
    let mut i = 0;
    while i < FileField::COUNT {
        let field = FileField::ALL[i];
        let (narrow, wide_span) = field.spans();
        table[field as usize] = if wide { wide_span } else { narrow };
        i += 1;
    }
    table
}

const fn section_table(wide: bool) -> SectionLayout {
    let mut table = [FieldSpan::new(0, 0); SectionField::COUNT];
    let mut i = 0;
    while i < SectionField::COUNT {
        let field = SectionField::ALL[i];
        let (narrow, wide_span) = field.spans();
        table[field as usize] = if wide { wide_span } else { narrow };
        i += 1;
    }
    table
}

pub static FILE_LAYOUT_32: FileLayout = file_table(false);
pub static FILE_LAYOUT_64: FileLayout = file_table(true);
pub static SECTION_LAYOUT_32: SectionLayout = section_table(false);
pub static SECTION_LAYOUT_64: SectionLayout = section_table(true);

pub fn file_layout(class: BitClass) -> Option<&'static FileLayout> {
    match class {
        BitClass::ThirtyTwo => Some(&FILE_LAYOUT_32),
        BitClass::SixtyFour => Some(&FILE_LAYOUT_64),
        BitClass::Unknown(_) => None,
    }
}

pub fn section_layout(class: BitClass) -> Option<&'static SectionLayout> {
    match class {
        BitClass::ThirtyTwo => Some(&SECTION_LAYOUT_32),
        BitClass::SixtyFour => Some(&SECTION_LAYOUT_64),
        BitClass::Unknown(_) => None,
    }
}

/// Value `e_ehsize` carries for a well-formed file of this class (52 or 64).
pub fn expected_file_header_size(class: BitClass) -> Option<usize> {
    file_layout(class).map(|table| table.iter().map(|span| span.end()).max().unwrap_or(0))
}

/// Bytes one section header occupies (40 or 64).
pub fn section_header_size(class: BitClass) -> Option<usize> {
    section_layout(class).map(|table| table.iter().map(|span| span.end()).max().unwrap_or(0))
}
