//! This crate locates the separate debug information file of a stripped ELF
//! binary, following its `.gnu_debuglink` section (and optionally its GNU
//! build ID), and validates it.
//!
//! # Example
//!
//! ```no_run
//! use sepdebug_finder::{Resolver, SearchConfig};
//!
//! let config = SearchConfig::default().with_debug_dirs(["/usr/lib/debug", "/opt/debug"]);
//! let resolver = Resolver::new(config);
//!
//! let debug_file = resolver.resolve("./hello.stripped").unwrap();
//! println!("{} ({})", debug_file.path.display(), debug_file.origin);
//! ```

mod candidates;
mod config;
mod crc;
mod error;
mod resolver;
mod validate;

pub use self::candidates::{Candidate, CandidateOrigin, Candidates};
pub use self::config::{DEFAULT_DEBUG_DIR, SearchConfig};
pub use self::crc::Crc32;
pub use self::error::{ResolveError, Result};
pub use self::resolver::{ResolvedDebugFile, Resolver};
pub use self::validate::{validate, validate_build_id};
