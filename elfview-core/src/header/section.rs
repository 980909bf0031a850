use crate::decode::Encoding;
use crate::error::{HeaderError, Result};
use crate::layout::SectionField;
use crate::sections::{SectionFlags, SectionType};
use serde::Serialize;

/// Read-only view over one section header (`Elf32_Shdr` / `Elf64_Shdr`).
///
/// The encoding comes from the owning file header, so every accessor here is
/// infallible once the view exists.
#[derive(Debug, Clone, Copy)]
pub struct SectionHeaderView<'a> {
    bytes: &'a [u8],
    encoding: Encoding,
}

impl<'a> SectionHeaderView<'a> {
    /// `bytes` must hold at least one section header for `encoding`'s class
    /// (40 or 64 bytes); extra bytes are ignored.
    pub fn new(bytes: &'a [u8], encoding: Encoding) -> Result<Self> {
        let needed = encoding.section_header_size();
        let bytes = bytes.get(..needed).ok_or(HeaderError::Truncated {
            needed,
            actual: bytes.len(),
        })?;
        Ok(Self { bytes, encoding })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// `sh_name`, an offset into the section name string table.
    pub fn name_offset(&self) -> u32 {
        self.read(SectionField::Name) as u32
    }

    pub fn section_type(&self) -> SectionType {
        SectionType::from(self.read(SectionField::Type) as u32)
    }

    pub fn flags(&self) -> SectionFlags {
        SectionFlags::from_bits_retain(self.read(SectionField::Flags))
    }

    /// `sh_addr`
    pub fn address(&self) -> u64 {
        self.read(SectionField::Address)
    }

    /// `sh_offset`
    pub fn file_offset(&self) -> u64 {
        self.read(SectionField::Offset)
    }

    pub fn size(&self) -> u64 {
        self.read(SectionField::Size)
    }

    pub fn link(&self) -> u32 {
        self.read(SectionField::Link) as u32
    }

    pub fn info(&self) -> u32 {
        self.read(SectionField::Info) as u32
    }

    pub fn address_alignment(&self) -> u64 {
        self.read(SectionField::AddressAlignment)
    }

    pub fn entry_size(&self) -> u64 {
        self.read(SectionField::EntrySize)
    }

    pub fn read(&self, field: SectionField) -> u64 {
        self.encoding
            .read(self.bytes, self.encoding.section_layout()[field as usize])
    }

    pub fn summary(&self) -> SectionHeaderSummary {
        SectionHeaderSummary {
            name_offset: self.name_offset(),
            section_type: self.section_type(),
            flags: self.flags().bits(),
            address: self.address(),
            file_offset: self.file_offset(),
            size: self.size(),
            link: self.link(),
            info: self.info(),
            address_alignment: self.address_alignment(),
            entry_size: self.entry_size(),
        }
    }
}

/// Every decoded section-header field, detached from the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeaderSummary {
    pub name_offset: u32,
    pub section_type: SectionType,
    pub flags: u64,
    pub address: u64,
    pub file_offset: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub address_alignment: u64,
    pub entry_size: u64,
}
