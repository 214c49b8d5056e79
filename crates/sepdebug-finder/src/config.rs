use std::path::{Component, Path, PathBuf};

/// Conventional global debug store.
pub const DEFAULT_DEBUG_DIR: &str = "/usr/lib/debug";

/// Where to search for separate debug files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Roots of the global debug stores, in search order.
    debug_dirs: Vec<PathBuf>,

    /// Directory prefixed to every debug store root.
    sysroot: Option<PathBuf>,

    /// Whether debug stores are also searched by build ID.
    build_id_lookup: bool,
}

impl Default for SearchConfig {
    /// Searches `/usr/lib/debug`, by name and by build ID.
    fn default() -> Self {
        Self {
            debug_dirs: vec![PathBuf::from(DEFAULT_DEBUG_DIR)],
            sysroot: None,
            build_id_lookup: true,
        }
    }
}

impl SearchConfig {
    /// Replaces the debug store roots.
    pub fn with_debug_dirs<I, P>(mut self, debug_dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.debug_dirs = debug_dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Specifies a directory to prefix every debug store root with.
    pub fn with_sysroot(mut self, sysroot: impl Into<PathBuf>) -> Self {
        self.sysroot = Some(sysroot.into());
        self
    }

    /// Enables or disables the lookup of debug files by build ID.
    pub fn with_build_id_lookup(mut self, enabled: bool) -> Self {
        self.build_id_lookup = enabled;
        self
    }

    /// Returns the debug store roots, as configured.
    pub fn debug_dirs(&self) -> &[PathBuf] {
        &self.debug_dirs
    }

    /// Returns the sysroot, if any.
    pub fn sysroot(&self) -> Option<&Path> {
        self.sysroot.as_deref()
    }

    /// Returns whether debug files are looked up by build ID.
    pub fn build_id_lookup(&self) -> bool {
        self.build_id_lookup
    }

    /// Returns the debug store roots, prefixed with the sysroot.
    pub(crate) fn store_roots(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.debug_dirs.iter().map(|dir| match self.sysroot {
            Some(ref sysroot) => sysroot.join(
                dir.components()
                    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
                    .collect::<PathBuf>(),
            ),
            None => dir.clone(),
        })
    }
}
