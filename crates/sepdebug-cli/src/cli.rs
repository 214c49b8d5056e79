use std::path::PathBuf;

/// Locates the separate debug information file of stripped ELF binaries.
#[derive(clap::Parser)]
pub struct CliOpts {
    /// The command to run.
    #[clap(subcommand)]
    pub action: CliAction,
}

/// The command to run.
#[derive(clap::Subcommand)]
pub enum CliAction {
    /// Command to find and validate the debug file linked from a binary.
    Resolve {
        /// Search configuration (KDL format).
        ///
        /// If it ends with `.kdl`, it is treated as a path to a configuration
        /// file. Otherwise it is directly parsed as inline KDL-formatted
        /// configuration. Without it, `/usr/lib/debug` is searched.
        #[clap(short, long, value_name = "CONTENT/PATH")]
        config: Option<String>,

        /// Path to the optional destination of the result.
        #[clap(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Path to the stripped binary.
        binary: PathBuf,
    },

    /// Command to dump the debug link and build ID of a binary.
    Inspect {
        /// Dump the section table as well.
        #[clap(long)]
        sections: bool,

        /// Path to the optional destination of the dump.
        #[clap(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Path to the binary.
        binary: PathBuf,
    },
}

impl CliOpts {
    /// Parses the CLI from the command-line.
    ///
    /// # Warning
    ///
    /// Exits on error.
    pub fn parse_from_cmdline() -> Self {
        <Self as clap::Parser>::parse()
    }
}
