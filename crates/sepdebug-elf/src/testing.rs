//! Helpers synthesising small ELF64 images in memory, so that tests do not
//! depend on a compiler or on `objcopy`.

use goblin::elf::note::NT_GNU_BUILD_ID;
use goblin::elf::section_header::{SHT_NOTE, SHT_PROGBITS, SHT_STRTAB};
use scroll::Endian;

use crate::DebugLink;

const EHDR_SIZE: usize = 64;
const SHDR_SIZE: usize = 64;

/// Builder of an ELF64 executable image made of sections only.
///
/// A null section is always emitted first and `.shstrtab` last.
#[derive(Debug, Clone)]
pub struct ElfImage {
    endian: Endian,
    sections: Vec<(String, u32, Vec<u8>)>,
}

impl Default for ElfImage {
    fn default() -> Self {
        Self::new()
    }
}

impl ElfImage {
    /// Creates a little-endian image with a small `.text` section.
    pub fn new() -> Self {
        Self {
            endian: Endian::Little,
            sections: vec![(".text".to_owned(), SHT_PROGBITS, vec![0xc3; 16])],
        }
    }

    /// Switches the image to big-endian.
    pub fn big_endian(mut self) -> Self {
        self.endian = Endian::Big;
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, name: impl Into<String>, sh_type: u32, data: Vec<u8>) -> Self {
        self.sections.push((name.into(), sh_type, data));
        self
    }

    /// Adds a `.gnu_debuglink` section for the given debug link.
    pub fn with_debug_link(self, link: &DebugLink) -> Self {
        let data = link.to_bytes_with(self.endian);
        self.with_raw_debug_link(data)
    }

    /// Adds a `.gnu_debuglink` section with arbitrary content.
    pub fn with_raw_debug_link(self, data: Vec<u8>) -> Self {
        self.with_section(crate::DEBUGLINK_SECTION, SHT_PROGBITS, data)
    }

    /// Adds a `.note.gnu.build-id` section holding the given build ID.
    pub fn with_build_id(self, build_id: &[u8]) -> Self {
        let data = note(b"GNU\0", NT_GNU_BUILD_ID, build_id, self.endian);
        self.with_section(".note.gnu.build-id", SHT_NOTE, data)
    }

    /// Serialises the image.
    pub fn build(&self) -> Vec<u8> {
        let mut shstrtab = vec![0u8];
        let mut name_offsets = Vec::with_capacity(self.sections.len() + 1);

        for name in self
            .sections
            .iter()
            .map(|(name, ..)| name.as_str())
            .chain([".shstrtab"])
        {
            name_offsets.push(shstrtab.len() as u32);
            shstrtab.extend_from_slice(name.as_bytes());
            shstrtab.push(0);
        }

        let mut data = Vec::new();
        let mut headers = Vec::with_capacity(self.sections.len() + 1);
        let mut offset = EHDR_SIZE;

        for ((_, sh_type, content), name) in self
            .sections
            .iter()
            .chain([&(String::new(), SHT_STRTAB, shstrtab)])
            .zip(&name_offsets)
        {
            headers.push((*name, *sh_type, offset as u64, content.len() as u64));
            data.extend_from_slice(content);
            offset += content.len();
        }

        let padding = offset.next_multiple_of(8) - offset;
        data.resize(data.len() + padding, 0);
        let shoff = offset + padding;
        let shnum = headers.len() + 1;

        let mut out = Writer {
            buf: Vec::with_capacity(shoff + shnum * SHDR_SIZE),
            endian: self.endian,
        };

        // e_ident
        out.bytes(b"\x7fELF");
        out.bytes(&[2, if self.endian.is_little() { 1 } else { 2 }, 1, 0]);
        out.bytes(&[0; 8]);

        out.u16(2); // e_type: ET_EXEC
        out.u16(62); // e_machine: EM_X86_64
        out.u32(1); // e_version
        out.u64(0); // e_entry
        out.u64(0); // e_phoff
        out.u64(shoff as u64);
        out.u32(0); // e_flags
        out.u16(EHDR_SIZE as u16);
        out.u16(56); // e_phentsize
        out.u16(0); // e_phnum
        out.u16(SHDR_SIZE as u16);
        out.u16(shnum as u16);
        out.u16((shnum - 1) as u16); // e_shstrndx

        out.bytes(&data);

        out.bytes(&[0; SHDR_SIZE]);
        for (name, sh_type, offset, size) in headers {
            out.u32(name);
            out.u32(sh_type);
            out.u64(0); // sh_flags
            out.u64(0); // sh_addr
            out.u64(offset);
            out.u64(size);
            out.u32(0); // sh_link
            out.u32(0); // sh_info
            out.u64(1); // sh_addralign
            out.u64(0); // sh_entsize
        }

        out.buf
    }
}

/// Encodes a single ELF note.
pub fn note(name: &[u8], n_type: u32, desc: &[u8], endian: Endian) -> Vec<u8> {
    let mut out = Writer {
        buf: Vec::new(),
        endian,
    };

    out.u32(name.len() as u32);
    out.u32(desc.len() as u32);
    out.u32(n_type);
    out.bytes(name);
    out.align4();
    out.bytes(desc);
    out.align4();

    out.buf
}

struct Writer {
    buf: Vec<u8>,
    endian: Endian,
}

impl Writer {
    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn align4(&mut self) {
        let len = self.buf.len().next_multiple_of(4);
        self.buf.resize(len, 0);
    }

    fn u16(&mut self, val: u16) {
        if self.endian.is_little() {
            self.bytes(&val.to_le_bytes());
        } else {
            self.bytes(&val.to_be_bytes());
        }
    }

    fn u32(&mut self, val: u32) {
        if self.endian.is_little() {
            self.bytes(&val.to_le_bytes());
        } else {
            self.bytes(&val.to_be_bytes());
        }
    }

    fn u64(&mut self, val: u64) {
        if self.endian.is_little() {
            self.bytes(&val.to_le_bytes());
        } else {
            self.bytes(&val.to_be_bytes());
        }
    }
}
