use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sepdebug_elf::{BuildId, DebugLink, ElfFile};

use crate::{CandidateOrigin, ResolveError, SearchConfig, validate, validate_build_id};

/// Separate debug file matching a binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDebugFile {
    /// Path to the debug file.
    pub path: PathBuf,

    /// How the path was derived.
    pub origin: CandidateOrigin,

    /// Debug link of the binary.
    pub debug_link: DebugLink,

    /// Build ID of the binary, if any.
    pub build_id: Option<BuildId>,
}

/// Resolver of the separate debug files of stripped binaries.
///
/// Each resolution is independent: nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: SearchConfig,
}

impl Resolver {
    /// Creates a resolver searching as configured.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Finds the debug file linked from the binary at `binary_path`.
    ///
    /// Candidates (see [SearchConfig::candidates]) are tried in order, and
    /// the first one whose CRC (or build ID, for build ID candidates)
    /// matches is returned. Unreadable candidates are skipped.
    #[tracing::instrument(name = "Resolve", skip_all, fields(binary = %binary_path.as_ref().display()))]
    pub fn resolve(&self, binary_path: impl AsRef<Path>) -> crate::Result<ResolvedDebugFile> {
        let binary_path = std::path::absolute(binary_path.as_ref())
            .map_err(|e| ResolveError::File(binary_path.as_ref().to_path_buf(), e))?;

        let (debug_link, build_id) = read_binary(&binary_path)?;

        tracing::debug!(
            file_name = debug_link.file_name(),
            crc = format_args!("{:#010x}", debug_link.crc()),
            build_id = ?build_id,
            "found debug link"
        );

        let mut tried = 0;

        for candidate in self
            .config
            .candidates(debug_link.file_name(), &binary_path, build_id.as_ref())
        {
            tried += 1;

            let res = match (candidate.origin.is_build_id(), build_id.as_ref()) {
                (true, Some(build_id)) => validate_build_id(&candidate.path, build_id),
                _ => validate(&candidate.path, debug_link.crc()),
            };

            match res {
                Ok(true) => {
                    tracing::info!(
                        path = %candidate.path.display(),
                        origin = %candidate.origin,
                        "found debug file"
                    );

                    return Ok(ResolvedDebugFile {
                        path: candidate.path,
                        origin: candidate.origin,
                        debug_link,
                        build_id,
                    });
                }
                Ok(false) => {
                    tracing::debug!(path = %candidate.path.display(), "candidate mismatch");
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %candidate.path.display(), "no candidate");
                }
                Err(e) => {
                    tracing::warn!(path = %candidate.path.display(), "skipping candidate: {e}");
                }
            }
        }

        Err(ResolveError::NoMatch {
            file_name: debug_link.file_name().to_owned(),
            tried,
        })
    }
}

/// Reads the debug link and the build ID of a binary.
fn read_binary(path: &Path) -> crate::Result<(DebugLink, Option<BuildId>)> {
    let data = std::fs::read(path).map_err(|e| ResolveError::File(path.to_path_buf(), e))?;
    let elf = ElfFile::parse(&data)?;

    let debug_link = elf.debug_link()?.ok_or(ResolveError::NoDebugLink)?;

    Ok((debug_link, elf.build_id()))
}
