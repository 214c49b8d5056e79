use std::path::{Path, PathBuf};

use sepdebug_elf::DebugLink;
use sepdebug_elf::testing::ElfImage;
use sepdebug_finder::Crc32;

/// Content of the debug file of `hello`.
pub const HELLO_DEBUG: &[u8] = b"\x7fELF pretend this is hello.debug";

/// Writes `content` at `path`, creating parent directories.
pub fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }

    std::fs::write(path, content).expect("write");
}

/// Writes a stripped `hello` binary in `dir`, linked to a `hello.debug`
/// whose content is [HELLO_DEBUG].
pub fn write_stripped_hello(dir: &Path, build_id: Option<&[u8]>) -> PathBuf {
    let link = DebugLink::new("hello.debug", Crc32::checksum(HELLO_DEBUG)).expect("debug link");

    let mut image = ElfImage::new().with_debug_link(&link);
    if let Some(build_id) = build_id {
        image = image.with_build_id(build_id);
    }

    let path = dir.join("hello");
    write_file(&path, &image.build());
    path
}
