use crate::decode::Encoding;
use crate::error::{HeaderError, Result};
use crate::header::section::SectionHeaderView;
use crate::header::Header;
use crate::ident::{BitClass, Endianness, ObjectType, OsAbi, ELF_MAGIC};
use crate::layout::{FileField, FILE_HEADER_SIZE};
use crate::machine::Machine;
use serde::Serialize;

/// Read-only view over the ELF file header (`Elf32_Ehdr` / `Elf64_Ehdr`).
///
/// The view borrows the first [`FILE_HEADER_SIZE`] bytes of the caller's
/// buffer. Class and data encoding are read once at construction; every
/// multi-byte accessor then decodes through the same [`Encoding`].
///
/// Construction succeeds for any buffer that is long enough, so malformed
/// input can still be probed with [`is_elf_file`](Self::is_elf_file),
/// [`bit_class`](Self::bit_class) and [`endianness`](Self::endianness). When
/// either of the latter is unknown, multi-byte accessors return
/// [`HeaderError::UnknownClass`] or [`HeaderError::UnknownEndianness`].
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy)]
pub struct FileHeaderView<'a> {
    bytes: &'a [u8; FILE_HEADER_SIZE],
    bit_class: BitClass,
    endianness: Endianness,
    encoding: Result<Encoding>,
}

impl<'a> FileHeaderView<'a> {
    /// Wraps `bytes`, which must hold at least [`FILE_HEADER_SIZE`] bytes.
    /// Anything past the header is ignored, so a whole file may be passed.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let head: &'a [u8; FILE_HEADER_SIZE] = bytes
            .get(..FILE_HEADER_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(HeaderError::Truncated {
                needed: FILE_HEADER_SIZE,
                actual: bytes.len(),
            })?;

        let bit_class = BitClass::from(ident_byte(head, FileField::Class));
        let endianness = Endianness::from(ident_byte(head, FileField::Data));
        let encoding = Encoding::new(bit_class, endianness);
        if let Err(err) = encoding {
            log::debug!("file header has no usable encoding: {err}");
        }

        Ok(Self {
            bytes: head,
            bit_class,
            endianness,
            encoding,
        })
    }

    /// True iff the buffer starts with `\x7FELF`.
    pub fn is_elf_file(&self) -> bool {
        self.bytes[..ELF_MAGIC.len()] == ELF_MAGIC
    }

    pub fn bit_class(&self) -> BitClass {
        self.bit_class
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The resolved class and byte order, or why they could not be resolved.
    pub fn encoding(&self) -> Result<Encoding> {
        self.encoding
    }

    /// `EI_VERSION`
    pub fn ident_version(&self) -> u8 {
        ident_byte(self.bytes, FileField::IdentVersion)
    }

    pub fn os_abi(&self) -> OsAbi {
        OsAbi::from(ident_byte(self.bytes, FileField::OsAbi))
    }

    pub fn abi_version(&self) -> u8 {
        ident_byte(self.bytes, FileField::AbiVersion)
    }

    pub fn object_type(&self) -> Result<ObjectType> {
        self.read_integer(FileField::Type)
            .map(|raw| ObjectType::from(raw as u16))
    }

    pub fn machine(&self) -> Result<Machine> {
        self.read_integer(FileField::Machine)
            .map(|raw| Machine::from(raw as u16))
    }

    /// `e_version`
    pub fn version(&self) -> Result<u32> {
        self.read_integer(FileField::Version).map(|raw| raw as u32)
    }

    pub fn entry(&self) -> Result<u64> {
        self.read_integer(FileField::Entry)
    }

    pub fn program_header_offset(&self) -> Result<u64> {
        self.read_integer(FileField::ProgramHeaderOffset)
    }

    pub fn section_header_offset(&self) -> Result<u64> {
        self.read_integer(FileField::SectionHeaderOffset)
    }

    /// Processor-specific `e_flags`, returned unchanged.
    pub fn flags(&self) -> Result<u32> {
        self.read_integer(FileField::Flags).map(|raw| raw as u32)
    }

    /// `e_ehsize`
    pub fn header_size(&self) -> Result<u16> {
        self.read_integer(FileField::HeaderSize).map(|raw| raw as u16)
    }

    pub fn program_header_entry_size(&self) -> Result<u16> {
        self.read_integer(FileField::ProgramHeaderEntrySize)
            .map(|raw| raw as u16)
    }

    pub fn program_header_count(&self) -> Result<u16> {
        self.read_integer(FileField::ProgramHeaderCount)
            .map(|raw| raw as u16)
    }

    pub fn section_header_entry_size(&self) -> Result<u16> {
        self.read_integer(FileField::SectionHeaderEntrySize)
            .map(|raw| raw as u16)
    }

    pub fn section_header_count(&self) -> Result<u16> {
        self.read_integer(FileField::SectionHeaderCount)
            .map(|raw| raw as u16)
    }

    /// `e_shstrndx`
    pub fn section_header_string_table_index(&self) -> Result<u16> {
        self.read_integer(FileField::SectionNameTableIndex)
            .map(|raw| raw as u16)
    }

    /// Reads any integer field. `ei_mag` and `ei_pad` are byte ranges; use
    /// [`field_bytes`](Self::field_bytes) for those.
    pub fn read(&self, field: FileField) -> Result<u64> {
        if field.is_byte_range() {
            return Err(HeaderError::NotAnInteger(field.name()));
        }
        if let Some(offset) = field.ident_offset() {
            return Ok(u64::from(self.bytes[offset]));
        }
        self.read_integer(field)
    }

    /// Raw bytes of `field`, or `None` when its position depends on an
    /// unknown class.
    pub fn field_bytes(&self, field: FileField) -> Option<&'a [u8]> {
        let bytes: &'a [u8; FILE_HEADER_SIZE] = self.bytes;
        field
            .span(self.bit_class)
            .or_else(|| field.fixed_span())
            .map(|span| &bytes[span.range()])
    }

    /// Builds a view over one entry of the section header table, decoded with
    /// this header's encoding. Slicing the table is the caller's job.
    pub fn section_header<'b>(&self, bytes: &'b [u8]) -> Result<SectionHeaderView<'b>> {
        SectionHeaderView::new(bytes, self.encoding?)
    }

    /// Owned snapshot of every field.
    pub fn summary(&self) -> Result<FileHeaderSummary> {
        Ok(FileHeaderSummary {
            is_elf: self.is_elf_file(),
            class: self.bit_class,
            endianness: self.endianness,
            ident_version: self.ident_version(),
            os_abi: self.os_abi(),
            abi_version: self.abi_version(),
            object_type: self.object_type()?,
            machine: self.machine()?,
            version: self.version()?,
            entry: self.entry()?,
            program_header_offset: self.program_header_offset()?,
            section_header_offset: self.section_header_offset()?,
            flags: self.flags()?,
            header_size: self.header_size()?,
            program_header_entry_size: self.program_header_entry_size()?,
            program_header_count: self.program_header_count()?,
            section_header_entry_size: self.section_header_entry_size()?,
            section_header_count: self.section_header_count()?,
            section_header_string_table_index: self.section_header_string_table_index()?,
        })
    }

    fn read_integer(&self, field: FileField) -> Result<u64> {
        let encoding = self.encoding?;
        Ok(encoding.read(self.bytes, encoding.file_layout()[field as usize]))
    }
}

fn ident_byte(bytes: &[u8; FILE_HEADER_SIZE], field: FileField) -> u8 {
    match field.ident_offset() {
        Some(offset) => bytes[offset],
        None => unreachable!("{} is not an e_ident byte", field.name()),
    }
}

impl Header for FileHeaderView<'_> {
    fn entry_point(&self) -> Result<u64> {
        self.entry()
    }

    fn machine(&self) -> Result<Machine> {
        FileHeaderView::machine(self)
    }

    fn is_64(&self) -> bool {
        self.bit_class == BitClass::SixtyFour
    }

    fn format_name(&self) -> &'static str {
        "ELF"
    }

    fn is_executable(&self) -> Result<bool> {
        Ok(self.object_type()? == ObjectType::Executable)
    }
}

/// Every decoded file-header field, detached from the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHeaderSummary {
    pub is_elf: bool,
    pub class: BitClass,
    pub endianness: Endianness,
    pub ident_version: u8,
    pub os_abi: OsAbi,
    pub abi_version: u8,
    pub object_type: ObjectType,
    pub machine: Machine,
    pub version: u32,
    pub entry: u64,
    pub program_header_offset: u64,
    pub section_header_offset: u64,
    pub flags: u32,
    pub header_size: u16,
    pub program_header_entry_size: u16,
    pub program_header_count: u16,
    pub section_header_entry_size: u16,
    pub section_header_count: u16,
    pub section_header_string_table_index: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elf64_le_exec() -> [u8; 64] {
        let mut data = [0u8; 64];
        data[0..4].copy_from_slice(&ELF_MAGIC);
        data[4] = 2; // ELFCLASS64
        data[5] = 1; // ELFDATA2LSB
        data[6] = 1; // EV_CURRENT
        data[7] = 3; // Linux
        data[0x10..0x12].copy_from_slice(&2u16.to_le_bytes());
        data[0x12..0x14].copy_from_slice(&0x3Eu16.to_le_bytes());
        data[0x14..0x18].copy_from_slice(&1u32.to_le_bytes());
        data[0x18..0x20].copy_from_slice(&0x401000u64.to_le_bytes());
        data[0x20..0x28].copy_from_slice(&64u64.to_le_bytes());
        data[0x28..0x30].copy_from_slice(&0x3a00u64.to_le_bytes());
        data[0x34..0x36].copy_from_slice(&64u16.to_le_bytes());
        data[0x36..0x38].copy_from_slice(&56u16.to_le_bytes());
        data[0x38..0x3A].copy_from_slice(&13u16.to_le_bytes());
        data[0x3A..0x3C].copy_from_slice(&64u16.to_le_bytes());
        data[0x3C..0x3E].copy_from_slice(&31u16.to_le_bytes());
        data[0x3E..0x40].copy_from_slice(&30u16.to_le_bytes());
        data
    }

    #[test]
    fn decodes_x86_64_executable() {
        let data = elf64_le_exec();
        let header = FileHeaderView::new(&data).unwrap();

        assert!(header.is_elf_file());
        assert_eq!(header.bit_class(), BitClass::SixtyFour);
        assert_eq!(header.endianness(), Endianness::Little);
        assert_eq!(header.os_abi(), OsAbi::Linux);
        assert_eq!(header.object_type(), Ok(ObjectType::Executable));
        assert_eq!(header.machine(), Ok(Machine::X86_64));
        assert_eq!(header.version(), Ok(1));
        assert_eq!(header.entry(), Ok(0x401000));
        assert_eq!(header.program_header_offset(), Ok(64));
        assert_eq!(header.section_header_offset(), Ok(0x3a00));
        assert_eq!(header.header_size(), Ok(64));
        assert_eq!(header.program_header_entry_size(), Ok(56));
        assert_eq!(header.program_header_count(), Ok(13));
        assert_eq!(header.section_header_entry_size(), Ok(64));
        assert_eq!(header.section_header_count(), Ok(31));
        assert_eq!(header.section_header_string_table_index(), Ok(30));
    }

    #[test]
    fn magic_must_match_exactly() {
        let mut data = elf64_le_exec();
        assert!(FileHeaderView::new(&data).unwrap().is_elf_file());
        for i in 0..4 {
            let original = data[i];
            data[i] ^= 0x20;
            assert!(!FileHeaderView::new(&data).unwrap().is_elf_file());
            data[i] = original;
        }
    }

    #[test]
    fn short_buffer_is_rejected() {
        let data = elf64_le_exec();
        let err = FileHeaderView::new(&data[..52]).unwrap_err();
        assert_eq!(
            err,
            HeaderError::Truncated {
                needed: 64,
                actual: 52
            }
        );
    }

    #[test]
    fn unknown_class_reports_errors_instead_of_panicking() {
        let mut data = elf64_le_exec();
        data[4] = 9;
        let header = FileHeaderView::new(&data).unwrap();

        assert!(header.is_elf_file());
        assert_eq!(header.bit_class(), BitClass::Unknown(9));
        assert_eq!(header.os_abi(), OsAbi::Linux);
        assert_eq!(header.entry(), Err(HeaderError::UnknownClass(9)));
        assert_eq!(header.machine(), Err(HeaderError::UnknownClass(9)));
        assert_eq!(header.field_bytes(FileField::Entry), None);
        assert!(header.summary().is_err());

        // ident bytes and e_type/e_machine sit at one place in both classes
        assert_eq!(header.field_bytes(FileField::Magic), Some(&ELF_MAGIC[..]));
        assert_eq!(header.field_bytes(FileField::Class), Some(&[9u8][..]));
        assert_eq!(header.field_bytes(FileField::Data), Some(&[1u8][..]));
        assert_eq!(header.field_bytes(FileField::Machine), Some(&data[0x12..0x14]));
        assert!(header.section_header(&[0u8; 64]).is_err());
    }

    #[test]
    fn unknown_endianness_reports_errors() {
        let mut data = elf64_le_exec();
        data[5] = 0;
        let header = FileHeaderView::new(&data).unwrap();

        assert_eq!(header.endianness(), Endianness::Unknown(0));
        assert_eq!(header.object_type(), Err(HeaderError::UnknownEndianness(0)));
        assert_eq!(header.read(FileField::OsAbi), Ok(3));
    }

    #[test]
    fn raw_field_access() {
        let data = elf64_le_exec();
        let header = FileHeaderView::new(&data).unwrap();

        assert_eq!(header.read(FileField::Entry), Ok(0x401000));
        assert_eq!(header.read(FileField::Class), Ok(2));
        assert_eq!(
            header.read(FileField::Padding),
            Err(HeaderError::NotAnInteger("ei_pad"))
        );
        assert_eq!(header.field_bytes(FileField::Magic), Some(&ELF_MAGIC[..]));
        assert_eq!(
            header.field_bytes(FileField::Entry),
            Some(&0x401000u64.to_le_bytes()[..])
        );
    }

    #[test]
    fn reads_are_repeatable() {
        let data = elf64_le_exec();
        let header = FileHeaderView::new(&data).unwrap();
        let first = header.summary().unwrap();
        for _ in 0..3 {
            assert_eq!(header.summary().unwrap(), first);
        }
    }

    #[test]
    fn header_trait_summary() {
        let data = elf64_le_exec();
        let header = FileHeaderView::new(&data).unwrap();
        let header: &dyn Header = &header;

        assert_eq!(header.entry_point(), Ok(0x401000));
        assert_eq!(header.machine(), Ok(Machine::X86_64));
        assert!(header.is_64());
        assert_eq!(header.format_name(), "ELF");
        assert_eq!(header.is_executable(), Ok(true));
    }
}
