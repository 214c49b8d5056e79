use goblin::elf::section_header::{SHN_UNDEF, SHN_XINDEX};
use goblin::elf::{Elf, SectionHeader};
use goblin::strtab::Strtab;
use scroll::Endian;

use crate::build_id::find_gnu_build_id;
use crate::{BuildId, DEBUGLINK_SECTION, DebugLink, ParseError, Section, SectionKind};

/// Name of the section usually holding the GNU build ID note.
const BUILD_ID_SECTION: &str = ".note.gnu.build-id";

/// ELF file parsed down to its section table.
pub struct ElfFile<'data> {
    /// Raw content of the file.
    data: &'data [u8],

    /// Byte order of the file.
    endian: Endian,

    /// Section table, in file order.
    sections: Vec<Section>,
}

impl<'data> ElfFile<'data> {
    /// Parses the ELF header and the section table of `data`.
    pub fn parse(data: &'data [u8]) -> crate::Result<Self> {
        let header = Elf::parse_header(data)?;
        let endian = header.endianness()?;
        let ctx = goblin::container::Ctx::new(header.container()?, endian);

        let shdrs = SectionHeader::parse(
            data,
            header.e_shoff as usize,
            header.e_shnum as usize,
            ctx,
        )?;

        let idx = match header.e_shstrndx.into() {
            SHN_XINDEX => shdrs.first().map(|shdr| shdr.sh_link as usize),
            SHN_UNDEF => None,
            n => Some(n as usize),
        };

        let shstrtab = idx
            .map(|i| {
                shdrs
                    .get(i)
                    .ok_or(crate::Error::InvalidShstrtabIndex(i))
                    .and_then(|shdr| {
                        Ok(Strtab::parse(
                            data,
                            shdr.sh_offset as usize,
                            shdr.sh_size as usize,
                            0x0,
                        )?)
                    })
            })
            .transpose()?;

        if shstrtab.is_none() {
            tracing::debug!("no section name string table");
        }

        let sections = shdrs
            .iter()
            .map(|shdr| {
                let name = shstrtab
                    .as_ref()
                    .and_then(|strtab| strtab.get_at(shdr.sh_name))
                    .unwrap_or_default();

                Section::new(
                    name.to_owned(),
                    SectionKind::from(shdr.sh_type),
                    shdr.sh_offset,
                    shdr.sh_size,
                )
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = sections.len(), endian = ?endian, "parsed section table");

        Ok(Self {
            data,
            endian,
            sections,
        })
    }

    /// Returns the byte order of the file.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns the section table.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the first section with the given name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name() == name)
    }

    /// Returns the data of the given section.
    ///
    /// `SHT_NOBITS` sections have no data.
    pub fn section_data(&self, section: &Section) -> crate::Result<&'data [u8]> {
        let Some(range) = section.file_range() else {
            return Ok(&[]);
        };

        usize::try_from(range.start)
            .ok()
            .zip(usize::try_from(range.end).ok())
            .and_then(|(start, end)| self.data.get(start..end))
            .ok_or_else(|| crate::Error::SectionOutOfBounds(section.name().to_owned()))
    }

    /// Returns the content of the `.gnu_debuglink` section, if any.
    ///
    /// The CRC is read in the byte order of the file. Section data cut short
    /// by the end of the file is reported as [ParseError::Truncated].
    pub fn debug_link(&self) -> Result<Option<DebugLink>, ParseError> {
        let Some(section) = self.section(DEBUGLINK_SECTION) else {
            return Ok(None);
        };

        let data = self
            .section_data(section)
            .map_err(|_| ParseError::Truncated)?;

        DebugLink::parse_with(data, self.endian).map(Some)
    }

    /// Returns the GNU build ID of the file, if any.
    ///
    /// The `.note.gnu.build-id` section is searched first, then every other
    /// `SHT_NOTE` section. Malformed notes are skipped.
    pub fn build_id(&self) -> Option<BuildId> {
        self.section(BUILD_ID_SECTION)
            .into_iter()
            .chain(self.sections.iter().filter(|section| {
                section.kind() == SectionKind::Note && section.name() != BUILD_ID_SECTION
            }))
            .find_map(|section| {
                let notes = self
                    .section_data(section)
                    .inspect_err(|e| tracing::debug!("skipping note section: {e}"))
                    .ok()?;

                find_gnu_build_id(notes, self.endian)
                    .inspect_err(|e| {
                        tracing::debug!(section = section.name(), "malformed note: {e}")
                    })
                    .ok()
                    .flatten()
            })
    }
}
