use std::io::Write;
use std::path::PathBuf;

use kdl::{KdlDocument, KdlEntry, KdlNode};
use miette::IntoDiagnostic;
use sepdebug_elf::{ElfFile, Section};

/// Runs the subcommand for dumping the debug link and build ID of a binary.
pub fn evaluate_inspect(
    binary: PathBuf,
    with_sections: bool,
    mut output: impl Write,
) -> miette::Result<()> {
    let data = std::fs::read(&binary).into_diagnostic()?;
    let elf = ElfFile::parse(&data).into_diagnostic()?;

    let mut node = KdlNode::new("binary");
    node.entries_mut()
        .push(binary.display().to_string().into());

    if let Some(build_id) = elf.build_id() {
        let mut build_id_node = KdlNode::new("build-id");
        build_id_node
            .entries_mut()
            .push(KdlEntry::new(build_id.to_hex()));
        node.ensure_children().nodes_mut().push(build_id_node);
    }

    match elf.debug_link() {
        Ok(Some(link)) => {
            let mut link_node = KdlNode::new("debug-link");
            link_node.entries_mut().push(KdlEntry::new(link.file_name()));
            link_node
                .entries_mut()
                .push(KdlEntry::new_prop("crc", format!("{:#010x}", link.crc())));
            node.ensure_children().nodes_mut().push(link_node);
        }
        Ok(None) => (),
        Err(e) => {
            let mut link_node = KdlNode::new("debug-link");
            link_node
                .entries_mut()
                .push(KdlEntry::new_prop("error", e.to_string()));
            node.ensure_children().nodes_mut().push(link_node);
        }
    }

    if with_sections {
        let mut sections_node = KdlNode::new("sections");
        sections_node
            .ensure_children()
            .nodes_mut()
            .extend(elf.sections().iter().map(dump_section_to_kdl_node));
        node.ensure_children().nodes_mut().push(sections_node);
    }

    let mut kdl = KdlDocument::new();
    kdl.nodes_mut().push(node);
    kdl.autoformat();

    output
        .write_all(kdl.to_string().as_bytes())
        .into_diagnostic()?;

    Ok(())
}

fn dump_section_to_kdl_node(section: &Section) -> KdlNode {
    let mut node = KdlNode::new("section");

    node.entries_mut().push(KdlEntry::new(section.name()));
    node.entries_mut()
        .push(KdlEntry::new_prop("type", section.kind().to_string()));
    node.entries_mut().push(KdlEntry::new_prop(
        "offset",
        format!("{:#x}", section.offset()),
    ));
    node.entries_mut()
        .push(KdlEntry::new_prop("size", i128::from(section.size())));

    node
}

#[cfg(test)]
mod tests {
    use kdl::KdlDocument;
    use sepdebug_elf::DebugLink;
    use sepdebug_elf::testing::ElfImage;

    use super::evaluate_inspect;

    fn inspect(image: Vec<u8>, with_sections: bool) -> KdlDocument {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join("hello");
        std::fs::write(&binary, image).expect("write");

        let mut output = Vec::new();
        evaluate_inspect(binary, with_sections, &mut output).expect("inspect");

        String::from_utf8(output)
            .expect("utf-8")
            .parse::<KdlDocument>()
            .expect("kdl")
    }

    #[test]
    fn inspect_stripped_binary() {
        let link = DebugLink::new("hello.debug", 0xdeadbeef).expect("debug link");
        let image = ElfImage::new()
            .with_build_id(&[0x01, 0x23, 0x45])
            .with_debug_link(&link)
            .build();

        let kdl = inspect(image, false);
        let children = kdl
            .get("binary")
            .and_then(|node| node.children())
            .expect("binary children");

        let build_id = children.get("build-id").expect("build-id node");
        assert_eq!(
            build_id.entry(0usize).and_then(|e| e.value().as_string()),
            Some("012345")
        );

        let link_node = children.get("debug-link").expect("debug-link node");
        assert_eq!(
            link_node.entry(0usize).and_then(|e| e.value().as_string()),
            Some("hello.debug")
        );
        assert_eq!(
            link_node.entry("crc").and_then(|e| e.value().as_string()),
            Some("0xdeadbeef")
        );

        assert!(children.get("sections").is_none());
    }

    #[test]
    fn inspect_sections() {
        let kdl = inspect(ElfImage::new().build(), true);
        let children = kdl
            .get("binary")
            .and_then(|node| node.children())
            .expect("binary children");

        assert!(children.get("debug-link").is_none());
        assert!(children.get("build-id").is_none());

        let sections = children
            .get("sections")
            .and_then(|node| node.children())
            .expect("sections children");

        let names = sections
            .nodes()
            .iter()
            .filter_map(|node| node.entry(0usize).and_then(|e| e.value().as_string()))
            .collect::<Vec<_>>();
        assert_eq!(names, ["", ".text", ".shstrtab"]);

        let text = &sections.nodes()[1];
        assert_eq!(
            text.entry("type").and_then(|e| e.value().as_string()),
            Some("PROGBITS")
        );
        assert_eq!(
            text.entry("offset").and_then(|e| e.value().as_string()),
            Some("0x40")
        );
        assert_eq!(
            text.entry("size").and_then(|e| e.value().as_integer()),
            Some(16)
        );
    }

    #[test]
    fn inspect_malformed_debug_link() {
        let image = ElfImage::new()
            .with_raw_debug_link(b"a/b\0\x01\x02\x03\x04".to_vec())
            .build();

        let kdl = inspect(image, false);
        let link_node = kdl
            .get("binary")
            .and_then(|node| node.children())
            .and_then(|children| children.get("debug-link"))
            .expect("debug-link node");

        assert_eq!(
            link_node.entry("error").and_then(|e| e.value().as_string()),
            Some("debug file name contains a path separator")
        );
    }
}
