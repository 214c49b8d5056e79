use scroll::{Endian, Pread};

use crate::ParseError;

/// Name of the section linking a stripped binary to its debug file.
pub const DEBUGLINK_SECTION: &str = ".gnu_debuglink";

/// Smallest amount of bytes following the debug file name: the NUL byte and
/// the CRC.
const MIN_TAIL_LEN: usize = 1 + 4;

/// Content of a `.gnu_debuglink` section.
///
/// The section is laid out as follows:
/// - the debug file name (without any directory component), followed by a
///   NUL byte,
/// - zero to three bytes of padding, up to the next 4-byte boundary,
/// - the CRC32 of the whole debug file, in the byte order of the ELF file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DebugLink {
    file_name: String,
    crc: u32,
}

impl DebugLink {
    /// Creates a debug link to the file named `file_name`.
    ///
    /// # Errors
    ///
    /// `file_name` must be a non-empty file name, with no path separator.
    pub fn new(file_name: impl Into<String>, crc: u32) -> Result<Self, ParseError> {
        let file_name = file_name.into();

        if file_name.is_empty() {
            return Err(ParseError::EmptyName);
        }

        if file_name.chars().any(std::path::is_separator) {
            return Err(ParseError::PathSeparator);
        }

        Ok(Self { file_name, crc })
    }

    /// Parses the content of a `.gnu_debuglink` section, with a
    /// little-endian CRC.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        Self::parse_with(data, Endian::Little)
    }

    /// Parses the content of a `.gnu_debuglink` section, with a CRC stored
    /// in the given byte order.
    ///
    /// Bytes following the CRC are ignored, and padding bytes are not
    /// checked.
    pub fn parse_with(data: &[u8], endian: Endian) -> Result<Self, ParseError> {
        if data.len() < MIN_TAIL_LEN {
            return Err(ParseError::Truncated);
        }

        let name_len = data
            .iter()
            .position(|byte| *byte == 0)
            .ok_or(ParseError::Truncated)?;

        if data.len() - name_len < MIN_TAIL_LEN {
            return Err(ParseError::Truncated);
        }

        let crc_offset = crc_offset(name_len);
        let crc = data
            .pread_with::<u32>(crc_offset, endian)
            .map_err(|_| ParseError::BadAlignment)?;

        let file_name = data
            .get(..name_len)
            .and_then(|name| std::str::from_utf8(name).ok())
            .ok_or(ParseError::InvalidName)?;

        Self::new(file_name, crc)
    }

    /// Returns the name of the debug file.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the CRC32 of the debug file.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Encodes the debug link as section content, with a little-endian CRC.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with(Endian::Little)
    }

    /// Encodes the debug link as section content, with a CRC stored in the
    /// given byte order.
    pub fn to_bytes_with(&self, endian: Endian) -> Vec<u8> {
        let mut bytes = self.file_name.as_bytes().to_vec();
        bytes.resize(crc_offset(self.file_name.len()), 0);

        let crc = if endian.is_little() {
            self.crc.to_le_bytes()
        } else {
            self.crc.to_be_bytes()
        };
        bytes.extend_from_slice(&crc);

        bytes
    }
}

/// Offset of the CRC, after a name of `name_len` bytes, its NUL byte and its
/// padding.
const fn crc_offset(name_len: usize) -> usize {
    (name_len + 1).next_multiple_of(4)
}

#[cfg(test)]
mod tests {
    use scroll::Endian;

    use super::DebugLink;
    use crate::ParseError;

    #[test]
    fn parse_hello_debug() {
        let data = b"hello.debug\0\xef\xbe\xad\xde";

        let link = DebugLink::parse(data).expect("parse");
        assert_eq!(link.file_name(), "hello.debug");
        assert_eq!(link.crc(), 0xdeadbeef);
    }

    #[test]
    fn parse_with_padding() {
        let data = b"x.debug\0\x78\x56\x34\x12";
        let link = DebugLink::parse(data).expect("parse");
        assert_eq!(link.file_name(), "x.debug");
        assert_eq!(link.crc(), 0x12345678);

        let data = b"ab\0\0\x01\0\0\0";
        let link = DebugLink::parse(data).expect("parse");
        assert_eq!(link.file_name(), "ab");
        assert_eq!(link.crc(), 1);
    }

    #[test]
    fn parse_big_endian_crc() {
        let data = b"hello.debug\0\xde\xad\xbe\xef";

        let link = DebugLink::parse_with(data, Endian::Big).expect("parse");
        assert_eq!(link.crc(), 0xdeadbeef);
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        let data = b"abc\0\x04\x03\x02\x01\0\0\0\0";

        let link = DebugLink::parse(data).expect("parse");
        assert_eq!(link.file_name(), "abc");
        assert_eq!(link.crc(), 0x01020304);
    }

    #[test]
    fn short_buffers_are_truncated() {
        const ALPHABET: [u8; 3] = [0, b'a', b'/'];

        let mut buffers = vec![vec![]];
        for len in 1..5 {
            let longer = buffers
                .iter()
                .filter(|buf| buf.len() == len - 1)
                .flat_map(|buf| {
                    ALPHABET.iter().map(move |byte| {
                        let mut buf = buf.clone();
                        buf.push(*byte);
                        buf
                    })
                })
                .collect::<Vec<_>>();
            buffers.extend(longer);
        }

        assert_eq!(buffers.len(), 1 + 3 + 9 + 27 + 81);

        for buf in buffers {
            assert_eq!(DebugLink::parse(&buf), Err(ParseError::Truncated), "{buf:?}");
        }
    }

    #[test]
    fn missing_nul_is_truncated() {
        assert_eq!(
            DebugLink::parse(b"hello.debug"),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn short_tail_is_truncated() {
        // name followed by NUL and only 3 CRC bytes
        assert_eq!(
            DebugLink::parse(b"hello.debug\0\x01\x02\x03"),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn unaligned_crc_is_rejected() {
        // 5 bytes remain after the name, but the CRC starts at offset 8
        assert_eq!(
            DebugLink::parse(b"abcde\0\x01\x02\x03\x04"),
            Err(ParseError::BadAlignment)
        );

        assert_eq!(
            DebugLink::parse(b"ab\0\x01\x02\x03\x04"),
            Err(ParseError::BadAlignment)
        );
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert_eq!(
            DebugLink::parse(b"\0\0\0\0\x01\x02\x03\x04"),
            Err(ParseError::EmptyName)
        );

        assert_eq!(
            DebugLink::parse(b"a/b\0\x01\x02\x03\x04"),
            Err(ParseError::PathSeparator)
        );

        assert_eq!(
            DebugLink::parse(b"/ab\0\x01\x02\x03\x04"),
            Err(ParseError::PathSeparator)
        );

        assert_eq!(
            DebugLink::parse(b"\xff\xfe\0\0\x01\x02\x03\x04"),
            Err(ParseError::InvalidName)
        );

        assert_eq!(DebugLink::new("", 0), Err(ParseError::EmptyName));
        assert_eq!(
            DebugLink::new("lib/hello.debug", 0),
            Err(ParseError::PathSeparator)
        );
    }

    #[test]
    fn encoding_reproduces_section() {
        let sections: [&[u8]; 4] = [
            b"a\0\0\0\x01\x00\x00\x00",
            b"abc\0\xef\xbe\xad\xde",
            b"abcd\0\0\0\0\x00\x00\x00\x80",
            b"hello.debug\0\x26\x39\xf4\xcb",
        ];

        for section in sections {
            let link = DebugLink::parse(section).expect("parse");
            assert_eq!(link.to_bytes(), section);
        }
    }

    #[test]
    fn encoding_pads_every_name_length() {
        for name_len in 1..=8 {
            let name = "n".repeat(name_len);
            let link = DebugLink::new(name, 0xcbf43926).expect("debug link");

            for endian in [Endian::Little, Endian::Big] {
                let bytes = link.to_bytes_with(endian);
                assert_eq!(bytes.len() % 4, 0);
                assert_eq!(DebugLink::parse_with(&bytes, endian), Ok(link.clone()));
            }
        }
    }
}
