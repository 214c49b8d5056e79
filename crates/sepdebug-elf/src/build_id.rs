use std::fmt;

use goblin::elf::note::NT_GNU_BUILD_ID;
use scroll::{Endian, Pread};

/// Owner name of GNU notes (NUL byte included).
const GNU_NOTE_NAME: &[u8] = b"GNU\0";

/// GNU build ID of an ELF file (`NT_GNU_BUILD_ID` note descriptor).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BuildId(Vec<u8>);

impl BuildId {
    /// Creates a build ID from its raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the raw bytes of the build ID.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the build ID as lowercase hexadecimal.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl fmt::Debug for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuildId({self})")
    }
}

/// Searches the content of a `SHT_NOTE` section for a GNU build ID.
pub(crate) fn find_gnu_build_id(
    notes: &[u8],
    endian: Endian,
) -> Result<Option<BuildId>, scroll::Error> {
    let mut offset = 0;

    while offset < notes.len() {
        let namesz: u32 = notes.gread_with(&mut offset, endian)?;
        let descsz: u32 = notes.gread_with(&mut offset, endian)?;
        let n_type: u32 = notes.gread_with(&mut offset, endian)?;

        let name: &[u8] = notes.gread_with(&mut offset, namesz as usize)?;
        offset = offset.next_multiple_of(4);

        let desc: &[u8] = notes.gread_with(&mut offset, descsz as usize)?;
        offset = offset.next_multiple_of(4);

        if n_type == NT_GNU_BUILD_ID && name == GNU_NOTE_NAME {
            return Ok(Some(BuildId::new(desc)));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use scroll::Endian;

    use super::{BuildId, find_gnu_build_id};
    use crate::testing::note;

    #[test]
    fn hex_rendering() {
        let id = BuildId::new([0x0a, 0xbc, 0x00, 0xff]);
        assert_eq!(id.to_hex(), "0abc00ff");
        assert_eq!(format!("{id:?}"), "BuildId(0abc00ff)");
    }

    #[test]
    fn find_build_id_among_notes() {
        let mut notes = note(b"GNU\0", 1, &[0, 0, 0, 0, 3, 0, 0, 0], Endian::Little);
        notes.extend(note(b"Go\0", 3, b"abc", Endian::Little));
        notes.extend(note(b"GNU\0", 3, &[0xde, 0xad, 0xbe, 0xef, 0x01], Endian::Little));

        let id = find_gnu_build_id(&notes, Endian::Little).expect("notes");
        assert_eq!(id, Some(BuildId::new([0xde, 0xad, 0xbe, 0xef, 0x01])));
    }

    #[test]
    fn find_build_id_big_endian() {
        let notes = note(b"GNU\0", 3, &[0x12, 0x34], Endian::Big);

        let id = find_gnu_build_id(&notes, Endian::Big).expect("notes");
        assert_eq!(id, Some(BuildId::new([0x12, 0x34])));
    }

    #[test]
    fn no_build_id() {
        let notes = note(b"GNU\0", 1, &[0; 16], Endian::Little);
        assert_eq!(find_gnu_build_id(&notes, Endian::Little).expect("notes"), None);
        assert_eq!(find_gnu_build_id(&[], Endian::Little).expect("notes"), None);
    }

    #[test]
    fn truncated_note() {
        let mut notes = note(b"GNU\0", 3, &[0x12; 20], Endian::Little);
        notes.truncate(notes.len() - 8);

        assert!(find_gnu_build_id(&notes, Endian::Little).is_err());
    }
}
