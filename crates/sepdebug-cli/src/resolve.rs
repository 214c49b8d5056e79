use std::io::Write;
use std::path::PathBuf;

use kdl::{KdlDocument, KdlEntry, KdlNode};
use miette::IntoDiagnostic;
use sepdebug_finder::{ResolvedDebugFile, Resolver};

use crate::config::parse_resolve_config;

/// Runs the subcommand for resolving the debug file of a binary.
pub fn evaluate_resolve(
    config: Option<String>,
    binary: PathBuf,
    mut output: impl Write,
) -> miette::Result<()> {
    let config = parse_resolve_config(config)?;

    let resolver = Resolver::new(config.into());
    let resolved = resolver.resolve(&binary).into_diagnostic()?;

    let mut kdl = KdlDocument::new();
    kdl.nodes_mut().push(dump_to_kdl_node(&resolved));
    kdl.autoformat();

    output
        .write_all(kdl.to_string().as_bytes())
        .into_diagnostic()?;

    Ok(())
}

fn dump_to_kdl_node(resolved: &ResolvedDebugFile) -> KdlNode {
    let mut node = KdlNode::new("debug-file");

    node.entries_mut()
        .push(KdlEntry::new(resolved.path.display().to_string()));
    node.entries_mut()
        .push(KdlEntry::new_prop("origin", resolved.origin.as_str()));

    let mut link_node = KdlNode::new("debug-link");
    link_node
        .entries_mut()
        .push(KdlEntry::new(resolved.debug_link.file_name()));
    link_node.entries_mut().push(KdlEntry::new_prop(
        "crc",
        format!("{:#010x}", resolved.debug_link.crc()),
    ));
    node.ensure_children().nodes_mut().push(link_node);

    if let Some(ref build_id) = resolved.build_id {
        let mut build_id_node = KdlNode::new("build-id");
        build_id_node
            .entries_mut()
            .push(KdlEntry::new(build_id.to_hex()));
        node.ensure_children().nodes_mut().push(build_id_node);
    }

    node
}
