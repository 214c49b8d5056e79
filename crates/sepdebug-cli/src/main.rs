#![allow(missing_docs)]
#![allow(clippy::print_stderr)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use miette::IntoDiagnostic;

use sepdebug_cli::{CliAction, CliOpts};

use tracing_subscriber::EnvFilter;

fn main() {
    let cli = CliOpts::parse_from_cmdline();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_env_var("SEPDEBUG_LOG")
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let res = match cli.action {
        CliAction::Resolve {
            config,
            output,
            binary,
        } => with_output(output, |output| {
            sepdebug_cli::evaluate_resolve(config, binary, output)
        }),
        CliAction::Inspect {
            sections,
            output,
            binary,
        } => with_output(output, |output| {
            sepdebug_cli::evaluate_inspect(binary, sections, output)
        }),
    };

    if let Err(e) = res {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn with_output(
    output: Option<PathBuf>,
    evaluate: impl FnOnce(&mut dyn Write) -> miette::Result<()>,
) -> miette::Result<()> {
    if let Some(output) = output {
        let mut file = File::create(output).into_diagnostic()?;
        evaluate(&mut file)
    } else {
        evaluate(&mut std::io::stdout())
    }
}
