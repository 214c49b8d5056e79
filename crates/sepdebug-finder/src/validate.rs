use std::fs::File;
use std::io;
use std::path::Path;

use sepdebug_elf::{BuildId, ElfFile};

use crate::Crc32;

/// Checks that the CRC-32 of the whole file at `path` is `expected_crc`.
///
/// A mismatch is `Ok(false)`. An error is only returned if the file cannot be
/// opened or read.
pub fn validate(path: impl AsRef<Path>, expected_crc: u32) -> io::Result<bool> {
    let mut file = File::open(path)?;

    let mut crc = Crc32::new();
    io::copy(&mut file, &mut crc)?;

    Ok(crc.finalize() == expected_crc)
}

/// Checks that the file at `path` is an ELF file with the given build ID.
///
/// A file which is not a valid ELF file is a mismatch. An error is only
/// returned if the file cannot be read.
pub fn validate_build_id(path: impl AsRef<Path>, expected: &BuildId) -> io::Result<bool> {
    let data = std::fs::read(path)?;

    match ElfFile::parse(&data) {
        Ok(elf) => Ok(elf.build_id().as_ref() == Some(expected)),
        Err(e) => {
            tracing::debug!("candidate is not an ELF file: {e}");
            Ok(false)
        }
    }
}
