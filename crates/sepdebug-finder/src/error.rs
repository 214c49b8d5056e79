use std::path::PathBuf;

use sepdebug_elf::ParseError;

/// Error type of this crate: the reason why a debug file could not be
/// resolved.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// The binary could not be read.
    #[error("{0}: {1}")]
    File(PathBuf, std::io::Error),

    /// The binary is not a valid ELF file.
    #[error(transparent)]
    Elf(#[from] sepdebug_elf::Error),

    /// The binary has no `.gnu_debuglink` section.
    #[error("no .gnu_debuglink section")]
    NoDebugLink,

    /// The `.gnu_debuglink` section is malformed.
    #[error("malformed .gnu_debuglink section")]
    Malformed(#[from] ParseError),

    /// No candidate matched the debug link.
    #[error("no valid {file_name} found ({tried} candidates tried)")]
    NoMatch {
        /// Name of the debug file from the debug link.
        file_name: String,

        /// Number of candidates tried.
        tried: usize,
    },
}

/// Result type of this crate.
pub type Result<T> = core::result::Result<T, ResolveError>;
