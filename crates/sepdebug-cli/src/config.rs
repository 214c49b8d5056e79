use std::ffi::OsStr;
use std::path::Path;

use miette::IntoDiagnostic;
use sepdebug_finder::SearchConfig;

/// Configuration of the debug file search.
#[derive(Debug, Default, PartialEq, knus::Decode)]
pub struct ResolveConfig {
    /// Roots of the global debug stores, in search order.
    ///
    /// Defaults to `/usr/lib/debug` if none is given.
    #[knus(children(name = "debug-dir"))]
    pub debug_dirs: Vec<DebugDir>,

    /// Directory prefixed to every debug store root.
    #[knus(child, unwrap(argument))]
    pub sysroot: Option<String>,

    /// Disables the lookup of debug files by build ID.
    #[knus(child)]
    pub no_build_id: bool,
}

/// Root of a global debug store.
#[derive(Debug, PartialEq, knus::Decode)]
pub struct DebugDir {
    /// Path to the debug store.
    #[knus(argument)]
    pub path: String,
}

impl From<ResolveConfig> for SearchConfig {
    fn from(config: ResolveConfig) -> Self {
        let mut search = SearchConfig::default().with_build_id_lookup(!config.no_build_id);

        if !config.debug_dirs.is_empty() {
            search = search.with_debug_dirs(config.debug_dirs.into_iter().map(|dir| dir.path));
        }

        if let Some(sysroot) = config.sysroot {
            search = search.with_sysroot(sysroot);
        }

        search
    }
}

/// Parses the search configuration, either inline or from a `.kdl` file.
pub fn parse_resolve_config(config: Option<String>) -> miette::Result<ResolveConfig> {
    let Some(config) = config else {
        return Ok(ResolveConfig::default());
    };

    let path = Path::new(&config);

    let config = if let Some((filename, "kdl")) = path
        .file_name()
        .and_then(OsStr::to_str)
        .zip(path.extension().and_then(OsStr::to_str))
    {
        let content = std::fs::read_to_string(path).into_diagnostic()?;
        knus::parse(filename, &content)?
    } else {
        knus::parse("<content>", &config)?
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sepdebug_finder::SearchConfig;

    use super::{DebugDir, ResolveConfig, parse_resolve_config};

    #[test]
    fn parse_from_kdl_defaults() {
        let config = knus::parse::<ResolveConfig>("<content>", "")
            .map_err(miette::Report::new)
            .expect("parse kdl");

        assert_eq!(config, ResolveConfig::default());
        assert_eq!(SearchConfig::from(config), SearchConfig::default());

        let config = parse_resolve_config(None).expect("default config");
        assert_eq!(config, ResolveConfig::default());
    }

    #[test]
    fn parse_from_kdl_full() {
        let config = knus::parse::<ResolveConfig>(
            "<content>",
            indoc::indoc! {r#"
                debug-dir "/usr/lib/debug"
                debug-dir "/opt/debug"
                sysroot "/srv/rootfs"
                no-build-id
            "#},
        )
        .map_err(miette::Report::new)
        .expect("parse kdl");

        assert_eq!(
            config,
            ResolveConfig {
                debug_dirs: vec![
                    DebugDir {
                        path: "/usr/lib/debug".to_owned()
                    },
                    DebugDir {
                        path: "/opt/debug".to_owned()
                    },
                ],
                sysroot: Some("/srv/rootfs".to_owned()),
                no_build_id: true,
            }
        );

        let search = SearchConfig::from(config);
        assert_eq!(
            search.debug_dirs(),
            [PathBuf::from("/usr/lib/debug"), PathBuf::from("/opt/debug")]
        );
        assert_eq!(search.sysroot(), Some(PathBuf::from("/srv/rootfs").as_path()));
        assert!(!search.build_id_lookup());
    }

    #[test]
    fn parse_from_kdl_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sepdebug.kdl");

        std::fs::write(&path, "debug-dir \"/opt/debug\"\n").expect("write");

        let config = parse_resolve_config(Some(path.display().to_string())).expect("parse kdl");
        assert_eq!(
            config.debug_dirs,
            [DebugDir {
                path: "/opt/debug".to_owned()
            }]
        );
        assert!(!config.no_build_id);
    }

    #[test]
    fn parse_invalid_kdl() {
        assert!(parse_resolve_config(Some("debug-dir".to_owned())).is_err());
        assert!(parse_resolve_config(Some("unknown-node 1".to_owned())).is_err());
    }
}
