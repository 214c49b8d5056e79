/// Error type of this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error from the [goblin] crate.
    #[error(transparent)]
    Goblin(#[from] goblin::error::Error),

    /// Invalid index of the section name string table.
    #[error("invalid .shstrtab index: {0}")]
    InvalidShstrtabIndex(usize),

    /// Section data lying (partly) outside of the file.
    #[error("section {0} out of file bounds")]
    SectionOutOfBounds(String),
}

/// Malformed `.gnu_debuglink` section content.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The section ends before the file name and CRC are complete.
    #[error("truncated .gnu_debuglink section")]
    Truncated,

    /// The 4-byte aligned CRC lies past the section end.
    #[error("CRC of .gnu_debuglink lies past the section end")]
    BadAlignment,

    /// The debug file name is empty.
    #[error("empty debug file name")]
    EmptyName,

    /// The debug file name is a path rather than a name.
    #[error("debug file name contains a path separator")]
    PathSeparator,

    /// The debug file name is not UTF-8.
    #[error("debug file name is not valid UTF-8")]
    InvalidName,
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;
