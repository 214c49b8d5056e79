use std::fmt;
use std::ops::Range;

use goblin::elf::section_header::{
    SHT_DYNAMIC, SHT_DYNSYM, SHT_HASH, SHT_NOBITS, SHT_NOTE, SHT_NULL, SHT_PROGBITS, SHT_REL,
    SHT_RELA, SHT_STRTAB, SHT_SYMTAB,
};

/// Type of an ELF section (`sh_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `SHT_NULL`
    Null,
    /// `SHT_PROGBITS`
    Progbits,
    /// `SHT_SYMTAB`
    Symtab,
    /// `SHT_STRTAB`
    Strtab,
    /// `SHT_RELA`
    Rela,
    /// `SHT_HASH`
    Hash,
    /// `SHT_DYNAMIC`
    Dynamic,
    /// `SHT_NOTE`
    Note,
    /// `SHT_NOBITS`
    Nobits,
    /// `SHT_REL`
    Rel,
    /// `SHT_DYNSYM`
    Dynsym,
    /// Any other section type.
    Other(u32),
}

impl From<u32> for SectionKind {
    fn from(sh_type: u32) -> Self {
        match sh_type {
            SHT_NULL => Self::Null,
            SHT_PROGBITS => Self::Progbits,
            SHT_SYMTAB => Self::Symtab,
            SHT_STRTAB => Self::Strtab,
            SHT_RELA => Self::Rela,
            SHT_HASH => Self::Hash,
            SHT_DYNAMIC => Self::Dynamic,
            SHT_NOTE => Self::Note,
            SHT_NOBITS => Self::Nobits,
            SHT_REL => Self::Rel,
            SHT_DYNSYM => Self::Dynsym,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Progbits => "PROGBITS",
            Self::Symtab => "SYMTAB",
            Self::Strtab => "STRTAB",
            Self::Rela => "RELA",
            Self::Hash => "HASH",
            Self::Dynamic => "DYNAMIC",
            Self::Note => "NOTE",
            Self::Nobits => "NOBITS",
            Self::Rel => "REL",
            Self::Dynsym => "DYNSYM",
            Self::Other(sh_type) => return write!(f, "{sh_type:#x}"),
        };

        f.write_str(name)
    }
}

/// Section header, as read from the section table of an ELF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Name of the section (empty if the file has no name string table).
    name: String,

    /// Type of the section.
    kind: SectionKind,

    /// Offset of the section data within the file.
    offset: u64,

    /// Size of the section data.
    size: u64,
}

impl Section {
    pub(crate) fn new(name: String, kind: SectionKind, offset: u64, size: u64) -> Self {
        Self {
            name,
            kind,
            offset,
            size,
        }
    }

    /// Returns the name of the section.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type of the section.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Returns the file offset of the section data.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the size of the section data.
    ///
    /// For `SHT_NOBITS` sections, this is the size occupied in memory, not in
    /// the file.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the range of the section data within the file, if the section
    /// occupies any space in it.
    pub(crate) fn file_range(&self) -> Option<Range<u64>> {
        (self.kind != SectionKind::Nobits)
            .then(|| self.offset..self.offset.saturating_add(self.size))
    }
}
