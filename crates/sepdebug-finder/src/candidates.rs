use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use sepdebug_elf::BuildId;

use crate::SearchConfig;

/// Name of the per-directory debug subdirectory.
const DEBUG_SUBDIR: &str = ".debug";

/// How a candidate path was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateOrigin {
    /// `<binary dir>/<debug file>`
    BinaryDir,

    /// `<binary dir>/.debug/<debug file>`
    DebugSubdir,

    /// `<debug store>/<debug file>`
    DebugStore,

    /// `<debug store>/.build-id/<xx>/<rest>.debug`
    BuildIdStore,

    /// `<debug store>/<build id>/debuginfo`
    BuildIdDebuginfo,
}

impl CandidateOrigin {
    /// Returns whether the candidate was derived from the build ID (rather
    /// than from the debug file name).
    pub const fn is_build_id(self) -> bool {
        matches!(self, Self::BuildIdStore | Self::BuildIdDebuginfo)
    }

    /// Returns a short kebab-case name of the origin.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BinaryDir => "binary-dir",
            Self::DebugSubdir => "debug-subdir",
            Self::DebugStore => "debug-store",
            Self::BuildIdStore => "build-id-store",
            Self::BuildIdDebuginfo => "build-id-debuginfo",
        }
    }
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A possible location of the debug file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path to the candidate file.
    pub path: PathBuf,

    /// How the path was derived.
    pub origin: CandidateOrigin,
}

/// Finite sequence of candidates, in priority order.
///
/// Once exhausted, it stays exhausted.
#[derive(Debug)]
pub struct Candidates {
    inner: std::vec::IntoIter<Candidate>,
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Candidates {}

impl FusedIterator for Candidates {}

impl SearchConfig {
    /// Returns the candidate locations of `debug_file_name`, the debug file
    /// linked from the binary at `binary_path`.
    ///
    /// Candidates come in this order:
    /// 1. the directory of the binary,
    /// 2. the `.debug` subdirectory of the binary's directory,
    /// 3. each debug store,
    /// 4. if build ID lookup is enabled and `build_id` is given, each debug
    ///    store's `.build-id/xx/rest.debug`, then `<build id>/debuginfo`.
    pub fn candidates(
        &self,
        debug_file_name: &str,
        binary_path: &Path,
        build_id: Option<&BuildId>,
    ) -> Candidates {
        let binary_dir = binary_path.parent().unwrap_or(Path::new(""));
        let store_roots = self.store_roots().collect::<Vec<_>>();

        let mut candidates = vec![
            Candidate {
                path: binary_dir.join(debug_file_name),
                origin: CandidateOrigin::BinaryDir,
            },
            Candidate {
                path: binary_dir.join(DEBUG_SUBDIR).join(debug_file_name),
                origin: CandidateOrigin::DebugSubdir,
            },
        ];

        candidates.extend(store_roots.iter().map(|root| Candidate {
            path: root.join(debug_file_name),
            origin: CandidateOrigin::DebugStore,
        }));

        let build_id = build_id
            .filter(|_| self.build_id_lookup())
            .map(BuildId::to_hex)
            .filter(|hex| hex.len() > 2);

        if let Some(hex) = build_id {
            let (prefix, rest) = hex.split_at(2);

            for root in &store_roots {
                candidates.push(Candidate {
                    path: root
                        .join(".build-id")
                        .join(prefix)
                        .join(format!("{rest}.debug")),
                    origin: CandidateOrigin::BuildIdStore,
                });

                candidates.push(Candidate {
                    path: root.join(&hex).join("debuginfo"),
                    origin: CandidateOrigin::BuildIdDebuginfo,
                });
            }
        }

        Candidates {
            inner: candidates.into_iter(),
        }
    }
}
