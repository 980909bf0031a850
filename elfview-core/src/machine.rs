use serde::Serialize;
use std::fmt;

/// Target instruction set architecture (`e_machine`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Machine {
    None,
    Sparc,
    X86,
    M68k,
    Mips,
    PowerPc,
    PowerPc64,
    S390,
    Arm,
    SuperH,
    Ia64,
    X86_64,
    AArch64,
    RiscV,
    LoongArch,
    Unknown(u16),
}

pub const EM_NONE: u16 = 0;
pub const EM_SPARC: u16 = 2;
pub const EM_386: u16 = 3;
pub const EM_68K: u16 = 4;
pub const EM_MIPS: u16 = 8;
pub const EM_PPC: u16 = 20;
pub const EM_PPC64: u16 = 21;
pub const EM_S390: u16 = 22;
pub const EM_ARM: u16 = 40;
pub const EM_SH: u16 = 42;
pub const EM_IA_64: u16 = 50;
pub const EM_X86_64: u16 = 62;
pub const EM_AARCH64: u16 = 183;
pub const EM_RISCV: u16 = 243;
pub const EM_LOONGARCH: u16 = 258;

impl From<u16> for Machine {
    fn from(val: u16) -> Self {
        match val {
            EM_NONE => Machine::None,
            EM_SPARC => Machine::Sparc,
            EM_386 => Machine::X86,
            EM_68K => Machine::M68k,
            EM_MIPS => Machine::Mips,
            EM_PPC => Machine::PowerPc,
            EM_PPC64 => Machine::PowerPc64,
            EM_S390 => Machine::S390,
            EM_ARM => Machine::Arm,
            EM_SH => Machine::SuperH,
            EM_IA_64 => Machine::Ia64,
            EM_X86_64 => Machine::X86_64,
            EM_AARCH64 => Machine::AArch64,
            EM_RISCV => Machine::RiscV,
            EM_LOONGARCH => Machine::LoongArch,
            other => Machine::Unknown(other),
        }
    }
}

impl Machine {
    pub fn raw(self) -> u16 {
        match self {
            Machine::None => EM_NONE,
            Machine::Sparc => EM_SPARC,
            Machine::X86 => EM_386,
            Machine::M68k => EM_68K,
            Machine::Mips => EM_MIPS,
            Machine::PowerPc => EM_PPC,
            Machine::PowerPc64 => EM_PPC64,
            Machine::S390 => EM_S390,
            Machine::Arm => EM_ARM,
            Machine::SuperH => EM_SH,
            Machine::Ia64 => EM_IA_64,
            Machine::X86_64 => EM_X86_64,
            Machine::AArch64 => EM_AARCH64,
            Machine::RiscV => EM_RISCV,
            Machine::LoongArch => EM_LOONGARCH,
            Machine::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Machine::None => "None",
            Machine::Sparc => "SPARC",
            Machine::X86 => "Intel 80386",
            Machine::M68k => "Motorola 68000",
            Machine::Mips => "MIPS",
            Machine::PowerPc => "PowerPC",
            Machine::PowerPc64 => "PowerPC64",
            Machine::S390 => "IBM S/390",
            Machine::Arm => "ARM",
            Machine::SuperH => "Renesas SuperH",
            Machine::Ia64 => "Intel IA-64",
            Machine::X86_64 => "Advanced Micro Devices X86-64",
            Machine::AArch64 => "AArch64",
            Machine::RiscV => "RISC-V",
            Machine::LoongArch => "LoongArch",
            Machine::Unknown(raw) => return write!(f, "unknown ({raw:#06x})"),
        };
        f.write_str(name)
    }
}
