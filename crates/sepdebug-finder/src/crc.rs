use std::io;

/// Reversed representation of the CRC-32 polynomial (zlib, ITU-T V.42).
const POLYNOMIAL: u32 = 0xedb8_8320;

static TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];

    let mut i = 0;
    while i < table.len() {
        let mut crc = i as u32;

        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Incremental CRC-32, as computed by `objcopy --add-gnu-debuglink`.
///
/// This is the zlib CRC (not CRC-32C): initial value and final XOR are both
/// `0xffffffff`.
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    /// Creates a CRC-32 over no data.
    pub const fn new() -> Self {
        Self { state: u32::MAX }
    }

    /// Computes the CRC-32 of `bytes` in one go.
    pub fn checksum(bytes: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(bytes);
        crc.finalize()
    }

    /// Feeds `bytes` into the CRC.
    pub fn update(&mut self, bytes: &[u8]) {
        self.state = bytes.iter().fold(self.state, |state, byte| {
            TABLE[usize::from(state as u8 ^ byte)] ^ (state >> 8)
        });
    }

    /// Returns the CRC-32 of all bytes fed so far.
    pub const fn finalize(self) -> u32 {
        self.state ^ u32::MAX
    }
}

impl io::Write for Crc32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
