use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use elfview_core::layout::expected_file_header_size;
use elfview_core::{FileHeaderView, Header, SectionHeaderSummary, SectionHeaderView};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// `e_shstrndx` escape: the real index lives in section 0's `sh_link`.
const SHN_XINDEX: u16 = 0xffff;

/// Simple ELF header inspection CLI
#[derive(Parser)]
#[command(
    name = "elfview",
    about = "Inspect ELF file and section headers",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show entry point of binary
    Entry,
    /// Show every file header field
    Header,
    /// List all section headers
    Sections,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Nr")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "EntSize")]
    entry_size: String,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "Link")]
    link: u32,
    #[tabled(rename = "Info")]
    info: u32,
    #[tabled(rename = "Align")]
    align: u64,
}

#[derive(Serialize)]
struct SectionEntry {
    index: usize,
    name: String,
    #[serde(flatten)]
    header: SectionHeaderSummary,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let bytes = std::fs::read(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let header = FileHeaderView::new(&bytes).context("file too small for an ELF header")?;

    if !header.is_elf_file() {
        bail!("{} is not an ELF file", cli.path.display());
    }

    match cli.command {
        Command::Entry => {
            let entry = header.entry_point()?;
            if cli.json {
                println!("{}", serde_json::json!({ "entry": entry }));
            } else {
                println!("Entry point: 0x{entry:x}");
            }
        }

        Command::Header => {
            let summary = header.summary()?;
            if let Some(expected) = expected_file_header_size(summary.class) {
                if usize::from(summary.header_size) != expected {
                    log::warn!(
                        "e_ehsize is {} but {} headers are {} bytes",
                        summary.header_size,
                        summary.class,
                        expected
                    );
                }
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let rows = vec![
                    row("Class", summary.class),
                    row("Data", summary.endianness),
                    row("Version", summary.ident_version),
                    row("OS/ABI", summary.os_abi),
                    row("ABI Version", summary.abi_version),
                    row("Type", summary.object_type),
                    row("Machine", summary.machine),
                    row("Version", format!("{:#x}", summary.version)),
                    row("Entry point address", format!("{:#x}", summary.entry)),
                    row("Start of program headers", summary.program_header_offset),
                    row("Start of section headers", summary.section_header_offset),
                    row("Flags", format!("{:#x}", summary.flags)),
                    row("Size of this header", summary.header_size),
                    row("Size of program headers", summary.program_header_entry_size),
                    row("Number of program headers", summary.program_header_count),
                    row("Size of section headers", summary.section_header_entry_size),
                    row("Number of section headers", summary.section_header_count),
                    row(
                        "Section header string table index",
                        summary.section_header_string_table_index,
                    ),
                ];
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }

        Command::Sections => {
            let sections = section_headers(&header, &bytes)?;
            if sections.is_empty() {
                println!("No sections found (possibly stripped binary).");
                return Ok(());
            }

            let names = section_names(&header, &sections, &bytes)?;
            let named = sections.iter().zip(names).enumerate();

            if cli.json {
                let entries: Vec<_> = named
                    .map(|(index, (section, name))| SectionEntry {
                        index,
                        name,
                        header: section.summary(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                let rows: Vec<_> = named
                    .map(|(index, (section, name))| SectionRow {
                        index,
                        name,
                        kind: section.section_type().to_string(),
                        address: format!("{:016x}", section.address()),
                        offset: format!("{:08x}", section.file_offset()),
                        size: format!("{:x}", section.size()),
                        entry_size: format!("{:x}", section.entry_size()),
                        flags: section.flags().to_string(),
                        link: section.link(),
                        info: section.info(),
                        align: section.address_alignment(),
                    })
                    .collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }
    }

    Ok(())
}

fn row(field: &'static str, value: impl ToString) -> FieldRow {
    FieldRow {
        field,
        value: value.to_string(),
    }
}

/// Slices the section header table out of `bytes`, one view per entry.
fn section_headers<'a>(
    header: &FileHeaderView<'_>,
    bytes: &'a [u8],
) -> Result<Vec<SectionHeaderView<'a>>> {
    let shoff = header.section_header_offset()?;
    let entry_size = usize::from(header.section_header_entry_size()?);
    if shoff == 0 || entry_size == 0 {
        return Ok(Vec::new());
    }
    let shoff = usize::try_from(shoff).context("e_shoff does not fit in memory")?;

    let mut count = usize::from(header.section_header_count()?);
    if count == 0 {
        // Extended numbering: the real count is section 0's sh_size.
        let first = entry_at(bytes, shoff, entry_size)
            .context("section header table lies outside the file")?;
        let claimed = header.section_header(first)?.size();
        let fits = bytes.len().saturating_sub(shoff) / entry_size;
        count = usize::try_from(claimed).map_or(fits, |claimed| claimed.min(fits));
        if (count as u64) < claimed {
            log::warn!("section 0 claims {claimed} sections but only {fits} fit in the file");
        }
        log::debug!("extended section numbering, {count} sections");
    }

    let mut sections = Vec::with_capacity(count);
    for index in 0..count {
        let start = index
            .checked_mul(entry_size)
            .and_then(|rel| rel.checked_add(shoff));
        let Some(entry) = start.and_then(|start| entry_at(bytes, start, entry_size)) else {
            log::warn!("section header {index} lies outside the file; stopping");
            break;
        };
        sections.push(header.section_header(entry)?);
    }
    Ok(sections)
}

fn entry_at(bytes: &[u8], start: usize, size: usize) -> Option<&[u8]> {
    bytes.get(start..start.checked_add(size)?)
}

fn section_names(
    header: &FileHeaderView<'_>,
    sections: &[SectionHeaderView<'_>],
    bytes: &[u8],
) -> Result<Vec<String>> {
    let strndx = string_table_index(header.section_header_string_table_index()?, sections);
    let strtab = strndx.and_then(|strndx| sections.get(strndx)).and_then(|strtab| {
        let start = usize::try_from(strtab.file_offset()).ok()?;
        let size = usize::try_from(strtab.size()).ok()?;
        entry_at(bytes, start, size)
    });
    if strtab.is_none() {
        log::warn!("section name string table {strndx:?} is unavailable");
    }

    Ok(sections
        .iter()
        .map(|section| match strtab {
            Some(table) => name_at(table, section.name_offset() as usize),
            None => format!("<{:#x}>", section.name_offset()),
        })
        .collect())
}

/// Resolves `e_shstrndx`, following the `SHN_XINDEX` escape into section 0.
fn string_table_index(strndx: u16, sections: &[SectionHeaderView<'_>]) -> Option<usize> {
    if strndx != SHN_XINDEX {
        return Some(usize::from(strndx));
    }
    let first = sections.first()?;
    usize::try_from(first.link()).ok()
}

fn name_at(table: &[u8], offset: usize) -> String {
    let Some(tail) = table.get(offset..) else {
        return "<invalid_name>".to_string();
    };
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    std::str::from_utf8(&tail[..end])
        .unwrap_or("<invalid_utf8>")
        .to_string()
}
