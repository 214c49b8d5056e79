//! This crate provides the minimal ELF parsing needed to follow a stripped
//! binary to its separate debug information file.
//!
//! Only three things are read from an ELF file:
//! - the section table (names, types, file ranges),
//! - the `.gnu_debuglink` section (debug file name and CRC32),
//! - the GNU build ID note.
//!
//! # Example
//!
//! ```no_run
//! use sepdebug_elf::ElfFile;
//!
//! let data = std::fs::read("/usr/bin/ls").unwrap();
//! let elf = ElfFile::parse(&data).unwrap();
//!
//! if let Some(link) = elf.debug_link().unwrap() {
//!     println!("{} (crc {:#010x})", link.file_name(), link.crc());
//! }
//!
//! if let Some(build_id) = elf.build_id() {
//!     println!("build id: {build_id}");
//! }
//! ```

mod build_id;
mod debuglink;
mod error;
mod file;
mod section;

/// Module synthesising ELF images, for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use self::build_id::BuildId;
pub use self::debuglink::{DEBUGLINK_SECTION, DebugLink};
pub use self::error::{Error, ParseError, Result};
pub use self::file::ElfFile;
pub use self::section::{Section, SectionKind};

pub use scroll::Endian;
