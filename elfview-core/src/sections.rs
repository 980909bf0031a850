use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

pub const SHT_NULL: u32 = 0x00;
pub const SHT_PROGBITS: u32 = 0x01;
pub const SHT_SYMTAB: u32 = 0x02;
pub const SHT_STRTAB: u32 = 0x03;
pub const SHT_RELA: u32 = 0x04;
pub const SHT_HASH: u32 = 0x05;
pub const SHT_DYNAMIC: u32 = 0x06;
pub const SHT_NOTE: u32 = 0x07;
pub const SHT_NOBITS: u32 = 0x08;
pub const SHT_REL: u32 = 0x09;
pub const SHT_SHLIB: u32 = 0x0A;
pub const SHT_DYNSYM: u32 = 0x0B;
pub const SHT_INIT_ARRAY: u32 = 0x0E;
pub const SHT_FINI_ARRAY: u32 = 0x0F;
pub const SHT_PREINIT_ARRAY: u32 = 0x10;
pub const SHT_GROUP: u32 = 0x11;
pub const SHT_SYMTAB_SHNDX: u32 = 0x12;
/// Number of standard section types.
pub const SHT_NUM: u32 = 0x13;
pub const SHT_LOOS: u32 = 0x6000_0000;
pub const SHT_HIOS: u32 = 0x6FFF_FFFF;
pub const SHT_LOPROC: u32 = 0x7000_0000;
pub const SHT_HIPROC: u32 = 0x7FFF_FFFF;
pub const SHT_LOUSER: u32 = 0x8000_0000;
pub const SHT_HIUSER: u32 = 0xFFFF_FFFF;

/// Section contents and semantics (`sh_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionType {
    Null,
    ProgBits,
    SymTab,
    StrTab,
    Rela,
    Hash,
    Dynamic,
    Note,
    NoBits,
    Rel,
    ShLib,
    DynSym,
    InitArray,
    FiniArray,
    PreInitArray,
    Group,
    SymTabShndx,
    /// `SHT_LOOS..=SHT_HIOS`, e.g. `SHT_GNU_HASH`.
    OsSpecific(u32),
    /// `SHT_LOPROC..=SHT_HIPROC`, e.g. `SHT_ARM_ATTRIBUTES`.
    ProcessorSpecific(u32),
    /// `SHT_LOUSER..=SHT_HIUSER`
    User(u32),
    Unknown(u32),
}

impl From<u32> for SectionType {
    fn from(val: u32) -> Self {
        match val {
            SHT_NULL => SectionType::Null,
            SHT_PROGBITS => SectionType::ProgBits,
            SHT_SYMTAB => SectionType::SymTab,
            SHT_STRTAB => SectionType::StrTab,
            SHT_RELA => SectionType::Rela,
            SHT_HASH => SectionType::Hash,
            SHT_DYNAMIC => SectionType::Dynamic,
            SHT_NOTE => SectionType::Note,
            SHT_NOBITS => SectionType::NoBits,
            SHT_REL => SectionType::Rel,
            SHT_SHLIB => SectionType::ShLib,
            SHT_DYNSYM => SectionType::DynSym,
            SHT_INIT_ARRAY => SectionType::InitArray,
            SHT_FINI_ARRAY => SectionType::FiniArray,
            SHT_PREINIT_ARRAY => SectionType::PreInitArray,
            SHT_GROUP => SectionType::Group,
            SHT_SYMTAB_SHNDX => SectionType::SymTabShndx,
            SHT_LOOS..=SHT_HIOS => SectionType::OsSpecific(val),
            SHT_LOPROC..=SHT_HIPROC => SectionType::ProcessorSpecific(val),
            SHT_LOUSER..=SHT_HIUSER => SectionType::User(val),
            other => SectionType::Unknown(other),
        }
    }
}

impl SectionType {
    pub fn raw(self) -> u32 {
        match self {
            SectionType::Null => SHT_NULL,
            SectionType::ProgBits => SHT_PROGBITS,
            SectionType::SymTab => SHT_SYMTAB,
            SectionType::StrTab => SHT_STRTAB,
            SectionType::Rela => SHT_RELA,
            SectionType::Hash => SHT_HASH,
            SectionType::Dynamic => SHT_DYNAMIC,
            SectionType::Note => SHT_NOTE,
            SectionType::NoBits => SHT_NOBITS,
            SectionType::Rel => SHT_REL,
            SectionType::ShLib => SHT_SHLIB,
            SectionType::DynSym => SHT_DYNSYM,
            SectionType::InitArray => SHT_INIT_ARRAY,
            SectionType::FiniArray => SHT_FINI_ARRAY,
            SectionType::PreInitArray => SHT_PREINIT_ARRAY,
            SectionType::Group => SHT_GROUP,
            SectionType::SymTabShndx => SHT_SYMTAB_SHNDX,
            SectionType::OsSpecific(raw)
            | SectionType::ProcessorSpecific(raw)
            | SectionType::User(raw)
            | SectionType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Null => "NULL",
            SectionType::ProgBits => "PROGBITS",
            SectionType::SymTab => "SYMTAB",
            SectionType::StrTab => "STRTAB",
            SectionType::Rela => "RELA",
            SectionType::Hash => "HASH",
            SectionType::Dynamic => "DYNAMIC",
            SectionType::Note => "NOTE",
            SectionType::NoBits => "NOBITS",
            SectionType::Rel => "REL",
            SectionType::ShLib => "SHLIB",
            SectionType::DynSym => "DYNSYM",
            SectionType::InitArray => "INIT_ARRAY",
            SectionType::FiniArray => "FINI_ARRAY",
            SectionType::PreInitArray => "PREINIT_ARRAY",
            SectionType::Group => "GROUP",
            SectionType::SymTabShndx => "SYMTAB_SHNDX",
            SectionType::OsSpecific(raw) => return reserved(f, "LOOS", SHT_LOOS, *raw),
            SectionType::ProcessorSpecific(raw) => {
                return reserved(f, "LOPROC", SHT_LOPROC, *raw);
            }
            SectionType::User(raw) => return reserved(f, "LOUSER", SHT_LOUSER, *raw),
            SectionType::Unknown(raw) => return write!(f, "{raw:#010x}"),
        };
        f.write_str(name)
    }
}

// variants are public, so the payload may sit below its range
fn reserved(f: &mut fmt::Formatter<'_>, base_name: &str, base: u32, raw: u32) -> fmt::Result {
    match raw.checked_sub(base) {
        Some(delta) => write!(f, "{base_name}+{delta:#x}"),
        None => write!(f, "{raw:#010x}"),
    }
}

bitflags! {
    /// Section attribute bits (`sh_flags`).
    ///
    /// Built with `from_bits_retain`, so bits outside the named set are kept
    /// and [`SectionFlags::bits`] always returns the raw field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u64 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;
        const INFO_LINK = 0x40;
        const LINK_ORDER = 0x80;
        const OS_NONCONFORMING = 0x100;
        const GROUP = 0x200;
        const TLS = 0x400;
        const COMPRESSED = 0x800;
        const MASKOS = 0x0ff0_0000;
        const MASKPROC = 0xf000_0000;
        /// Solaris ordering requirement, inside `MASKPROC`.
        const ORDERED = 0x4000_0000;
        /// Excluded from links unless referenced, inside `MASKPROC`.
        const EXCLUDE = 0x8000_0000;

        const _ = !0;
    }
}

impl SectionFlags {
    pub fn is_writable(self) -> bool {
        self.contains(SectionFlags::WRITE)
    }

    pub fn is_allocated(self) -> bool {
        self.contains(SectionFlags::ALLOC)
    }

    pub fn is_executable(self) -> bool {
        self.contains(SectionFlags::EXECINSTR)
    }

    /// Bits reserved for operating-system semantics.
    pub fn os_bits(self) -> u64 {
        self.bits() & SectionFlags::MASKOS.bits()
    }

    /// Bits reserved for processor semantics.
    pub fn processor_bits(self) -> u64 {
        self.bits() & SectionFlags::MASKPROC.bits()
    }
}

// readelf key letters, then `o`/`p` for unnamed bits under the masks
impl fmt::Display for SectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = [
            (SectionFlags::WRITE, 'W'),
            (SectionFlags::ALLOC, 'A'),
            (SectionFlags::EXECINSTR, 'X'),
            (SectionFlags::MERGE, 'M'),
            (SectionFlags::STRINGS, 'S'),
            (SectionFlags::INFO_LINK, 'I'),
            (SectionFlags::LINK_ORDER, 'L'),
            (SectionFlags::OS_NONCONFORMING, 'O'),
            (SectionFlags::GROUP, 'G'),
            (SectionFlags::TLS, 'T'),
            (SectionFlags::COMPRESSED, 'C'),
            (SectionFlags::EXCLUDE, 'E'),
        ];
        for (flag, key) in keys {
            if self.contains(flag) {
                write!(f, "{key}")?;
            }
        }
        if self.os_bits() != 0 {
            f.write_str("o")?;
        }
        let named = (SectionFlags::ORDERED | SectionFlags::EXCLUDE).bits();
        if self.processor_bits() & !named != 0 {
            f.write_str("p")?;
        }
        Ok(())
    }
}
