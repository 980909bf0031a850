//! Cross-checks classification tables against goblin's copy of `elf.h`.

use elfview_core::{BitClass, Endianness, Machine, ObjectType, SectionFlags, SectionType};
use goblin::elf::header;
use goblin::elf::section_header as sh;

#[test]
fn ident_constants_match() {
    assert_eq!(&elfview_core::ELF_MAGIC, header::ELFMAG);
    assert_eq!(BitClass::from(header::ELFCLASS32), BitClass::ThirtyTwo);
    assert_eq!(BitClass::from(header::ELFCLASS64), BitClass::SixtyFour);
    assert_eq!(Endianness::from(header::ELFDATA2LSB), Endianness::Little);
    assert_eq!(Endianness::from(header::ELFDATA2MSB), Endianness::Big);
}

#[test]
fn object_types_match() {
    assert_eq!(ObjectType::from(header::ET_NONE), ObjectType::None);
    assert_eq!(ObjectType::from(header::ET_REL), ObjectType::Relocatable);
    assert_eq!(ObjectType::from(header::ET_EXEC), ObjectType::Executable);
    assert_eq!(ObjectType::from(header::ET_DYN), ObjectType::SharedObject);
    assert_eq!(ObjectType::from(header::ET_CORE), ObjectType::Core);
}

#[test]
fn machines_match() {
    let expected = [
        (header::EM_NONE, Machine::None),
        (header::EM_SPARC, Machine::Sparc),
        (header::EM_386, Machine::X86),
        (header::EM_68K, Machine::M68k),
        (header::EM_MIPS, Machine::Mips),
        (header::EM_PPC, Machine::PowerPc),
        (header::EM_PPC64, Machine::PowerPc64),
        (header::EM_S390, Machine::S390),
        (header::EM_ARM, Machine::Arm),
        (header::EM_SH, Machine::SuperH),
        (header::EM_IA_64, Machine::Ia64),
        (header::EM_X86_64, Machine::X86_64),
        (header::EM_AARCH64, Machine::AArch64),
        (header::EM_RISCV, Machine::RiscV),
    ];
    for (raw, machine) in expected {
        assert_eq!(Machine::from(raw), machine);
        assert_eq!(machine.raw(), raw);
    }
}

#[test]
fn section_types_match() {
    let expected = [
        (sh::SHT_NULL, SectionType::Null),
        (sh::SHT_PROGBITS, SectionType::ProgBits),
        (sh::SHT_SYMTAB, SectionType::SymTab),
        (sh::SHT_STRTAB, SectionType::StrTab),
        (sh::SHT_RELA, SectionType::Rela),
        (sh::SHT_HASH, SectionType::Hash),
        (sh::SHT_DYNAMIC, SectionType::Dynamic),
        (sh::SHT_NOTE, SectionType::Note),
        (sh::SHT_NOBITS, SectionType::NoBits),
        (sh::SHT_REL, SectionType::Rel),
        (sh::SHT_SHLIB, SectionType::ShLib),
        (sh::SHT_DYNSYM, SectionType::DynSym),
        (sh::SHT_INIT_ARRAY, SectionType::InitArray),
        (sh::SHT_FINI_ARRAY, SectionType::FiniArray),
        (sh::SHT_PREINIT_ARRAY, SectionType::PreInitArray),
        (sh::SHT_GROUP, SectionType::Group),
        (sh::SHT_SYMTAB_SHNDX, SectionType::SymTabShndx),
    ];
    for (raw, section_type) in expected {
        assert_eq!(SectionType::from(raw), section_type);
    }
    assert_eq!(elfview_core::sections::SHT_NUM, sh::SHT_NUM);
    assert_eq!(elfview_core::sections::SHT_LOOS, sh::SHT_LOOS);
    assert_eq!(SectionType::from(sh::SHT_GNU_HASH), SectionType::OsSpecific(sh::SHT_GNU_HASH));
}

#[test]
fn section_flags_match() {
    let expected = [
        (sh::SHF_WRITE, SectionFlags::WRITE),
        (sh::SHF_ALLOC, SectionFlags::ALLOC),
        (sh::SHF_EXECINSTR, SectionFlags::EXECINSTR),
        (sh::SHF_MERGE, SectionFlags::MERGE),
        (sh::SHF_STRINGS, SectionFlags::STRINGS),
        (sh::SHF_INFO_LINK, SectionFlags::INFO_LINK),
        (sh::SHF_LINK_ORDER, SectionFlags::LINK_ORDER),
        (sh::SHF_OS_NONCONFORMING, SectionFlags::OS_NONCONFORMING),
        (sh::SHF_GROUP, SectionFlags::GROUP),
        (sh::SHF_TLS, SectionFlags::TLS),
        (sh::SHF_COMPRESSED, SectionFlags::COMPRESSED),
        (sh::SHF_MASKOS, SectionFlags::MASKOS),
        (sh::SHF_MASKPROC, SectionFlags::MASKPROC),
        (sh::SHF_ORDERED, SectionFlags::ORDERED),
        (sh::SHF_EXCLUDE, SectionFlags::EXCLUDE),
    ];
    for (raw, flag) in expected {
        assert_eq!(u64::from(raw), flag.bits());
    }
}
