//! Classification of the `e_ident` bytes and of `e_type`.
//!
//! Every classifier is total: a value outside the published set lands in an
//! `Unknown` variant that keeps the raw byte, so callers can tell "present but
//! not understood" apart from a structural failure.

use serde::Serialize;
use std::fmt;

/// `\x7FELF`, the first four bytes of every ELF file.
pub const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

pub const ELFCLASS32: u8 = 1;
pub const ELFCLASS64: u8 = 2;
pub const ELFDATA2LSB: u8 = 1;
pub const ELFDATA2MSB: u8 = 2;

/// Width of addresses and offsets in the file (`EI_CLASS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BitClass {
    ThirtyTwo,
    SixtyFour,
    Unknown(u8),
}

impl From<u8> for BitClass {
    fn from(val: u8) -> Self {
        match val {
            ELFCLASS32 => BitClass::ThirtyTwo,
            ELFCLASS64 => BitClass::SixtyFour,
            other => BitClass::Unknown(other),
        }
    }
}

impl BitClass {
    pub fn raw(self) -> u8 {
        match self {
            BitClass::ThirtyTwo => ELFCLASS32,
            BitClass::SixtyFour => ELFCLASS64,
            BitClass::Unknown(raw) => raw,
        }
    }

    /// Size in bytes of an address-sized field, if the class is known.
    pub fn address_size(self) -> Option<usize> {
        match self {
            BitClass::ThirtyTwo => Some(4),
            BitClass::SixtyFour => Some(8),
            BitClass::Unknown(_) => None,
        }
    }
}

impl fmt::Display for BitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitClass::ThirtyTwo => write!(f, "ELF32"),
            BitClass::SixtyFour => write!(f, "ELF64"),
            BitClass::Unknown(raw) => write!(f, "unknown ({raw:#04x})"),
        }
    }
}

/// Byte order of every multi-byte integer in the file (`EI_DATA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endianness {
    Little,
    Big,
    Unknown(u8),
}

impl From<u8> for Endianness {
    fn from(val: u8) -> Self {
        match val {
            ELFDATA2LSB => Endianness::Little,
            ELFDATA2MSB => Endianness::Big,
            other => Endianness::Unknown(other),
        }
    }
}

impl Endianness {
    pub fn raw(self) -> u8 {
        match self {
            Endianness::Little => ELFDATA2LSB,
            Endianness::Big => ELFDATA2MSB,
            Endianness::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little endian"),
            Endianness::Big => write!(f, "big endian"),
            Endianness::Unknown(raw) => write!(f, "unknown ({raw:#04x})"),
        }
    }
}

/// Target operating system ABI (`EI_OSABI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OsAbi {
    SystemV,
    HpUx,
    NetBsd,
    Linux,
    GnuHurd,
    Solaris,
    Aix,
    Irix,
    FreeBsd,
    Tru64,
    NovellModesto,
    OpenBsd,
    OpenVms,
    NonStopKernel,
    Aros,
    FenixOs,
    CloudAbi,
    ArmAeabi,
    Arm,
    Standalone,
    Unknown(u8),
}

impl From<u8> for OsAbi {
    fn from(val: u8) -> Self {
        match val {
            0x00 => OsAbi::SystemV,
            0x01 => OsAbi::HpUx,
            0x02 => OsAbi::NetBsd,
            0x03 => OsAbi::Linux,
            0x04 => OsAbi::GnuHurd,
            0x06 => OsAbi::Solaris,
            0x07 => OsAbi::Aix,
            0x08 => OsAbi::Irix,
            0x09 => OsAbi::FreeBsd,
            0x0A => OsAbi::Tru64,
            0x0B => OsAbi::NovellModesto,
            0x0C => OsAbi::OpenBsd,
            0x0D => OsAbi::OpenVms,
            0x0E => OsAbi::NonStopKernel,
            0x0F => OsAbi::Aros,
            0x10 => OsAbi::FenixOs,
            0x11 => OsAbi::CloudAbi,
            0x40 => OsAbi::ArmAeabi,
            0x61 => OsAbi::Arm,
            0xFF => OsAbi::Standalone,
            other => OsAbi::Unknown(other),
        }
    }
}

impl OsAbi {
    pub fn raw(self) -> u8 {
        match self {
            OsAbi::SystemV => 0x00,
            OsAbi::HpUx => 0x01,
            OsAbi::NetBsd => 0x02,
            OsAbi::Linux => 0x03,
            OsAbi::GnuHurd => 0x04,
            OsAbi::Solaris => 0x06,
            OsAbi::Aix => 0x07,
            OsAbi::Irix => 0x08,
            OsAbi::FreeBsd => 0x09,
            OsAbi::Tru64 => 0x0A,
            OsAbi::NovellModesto => 0x0B,
            OsAbi::OpenBsd => 0x0C,
            OsAbi::OpenVms => 0x0D,
            OsAbi::NonStopKernel => 0x0E,
            OsAbi::Aros => 0x0F,
            OsAbi::FenixOs => 0x10,
            OsAbi::CloudAbi => 0x11,
            OsAbi::ArmAeabi => 0x40,
            OsAbi::Arm => 0x61,
            OsAbi::Standalone => 0xFF,
            OsAbi::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for OsAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsAbi::SystemV => "UNIX - System V",
            OsAbi::HpUx => "HP-UX",
            OsAbi::NetBsd => "NetBSD",
            OsAbi::Linux => "Linux",
            OsAbi::GnuHurd => "GNU Hurd",
            OsAbi::Solaris => "Solaris",
            OsAbi::Aix => "AIX",
            OsAbi::Irix => "IRIX",
            OsAbi::FreeBsd => "FreeBSD",
            OsAbi::Tru64 => "Tru64",
            OsAbi::NovellModesto => "Novell Modesto",
            OsAbi::OpenBsd => "OpenBSD",
            OsAbi::OpenVms => "OpenVMS",
            OsAbi::NonStopKernel => "NonStop Kernel",
            OsAbi::Aros => "AROS",
            OsAbi::FenixOs => "FenixOS",
            OsAbi::CloudAbi => "CloudABI",
            OsAbi::ArmAeabi => "ARM EABI",
            OsAbi::Arm => "ARM",
            OsAbi::Standalone => "Standalone",
            OsAbi::Unknown(raw) => return write!(f, "unknown ({raw:#04x})"),
        };
        f.write_str(name)
    }
}

pub const ET_LOOS: u16 = 0xFE00;
pub const ET_HIOS: u16 = 0xFEFF;
pub const ET_LOPROC: u16 = 0xFF00;
pub const ET_HIPROC: u16 = 0xFFFF;

/// Object file type (`e_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    /// `ET_LOOS..=ET_HIOS`
    OsSpecific(u16),
    /// `ET_LOPROC..=ET_HIPROC`
    ProcessorSpecific(u16),
    Unknown(u16),
}

impl From<u16> for ObjectType {
    fn from(val: u16) -> Self {
        match val {
            0 => ObjectType::None,
            1 => ObjectType::Relocatable,
            2 => ObjectType::Executable,
            3 => ObjectType::SharedObject,
            4 => ObjectType::Core,
            ET_LOOS..=ET_HIOS => ObjectType::OsSpecific(val),
            ET_LOPROC..=ET_HIPROC => ObjectType::ProcessorSpecific(val),
            other => ObjectType::Unknown(other),
        }
    }
}

impl ObjectType {
    pub fn raw(self) -> u16 {
        match self {
            ObjectType::None => 0,
            ObjectType::Relocatable => 1,
            ObjectType::Executable => 2,
            ObjectType::SharedObject => 3,
            ObjectType::Core => 4,
            ObjectType::OsSpecific(raw)
            | ObjectType::ProcessorSpecific(raw)
            | ObjectType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::None => f.write_str("NONE (No file type)"),
            ObjectType::Relocatable => f.write_str("REL (Relocatable file)"),
            ObjectType::Executable => f.write_str("EXEC (Executable file)"),
            ObjectType::SharedObject => f.write_str("DYN (Shared object file)"),
            ObjectType::Core => f.write_str("CORE (Core file)"),
            ObjectType::OsSpecific(raw) => write!(f, "OS specific ({raw:#06x})"),
            ObjectType::ProcessorSpecific(raw) => write!(f, "processor specific ({raw:#06x})"),
            ObjectType::Unknown(raw) => write!(f, "unknown ({raw:#06x})"),
        }
    }
}
