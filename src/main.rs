//! kustodian - consistency checker for GitOps repositories
//!
//! One pass over the repository: Applications and ApplicationSets must point
//! at real components, kustomization manifests must reference the files next
//! to them, and every overlay must still build.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use kustodian::logging::init_logging;
use kustodian::{Checker, DiskStore, KustomizeCli, TracingLogger, UnreferencedPolicy};

/// Checks the Argo CD configuration of a GitOps repository
#[derive(Parser, Debug)]
#[command(name = "kustodian")]
#[command(
    about = "Checks that Applications, ApplicationSets and kustomize components stay consistent",
    long_about = None
)]
struct Args {
    /// Base directory of the repository
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Path(s) to the applications (comma-separated, relative to --base-dir)
    #[arg(long, value_delimiter = ',')]
    apps: Vec<String>,

    /// Path(s) to the components (comma-separated, relative to --base-dir)
    #[arg(long, value_delimiter = ',')]
    components: Vec<String>,

    /// Fail on resources not referenced by their kustomization manifest
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let store = DiskStore::new();
    let builder = KustomizeCli::discover()?;
    let logger = TracingLogger;
    let policy = if args.strict {
        UnreferencedPolicy::Fail
    } else {
        UnreferencedPolicy::Warn
    };
    let checker = Checker::new(&store, &builder, &logger).with_policy(policy);

    // the source paths of Applications and ApplicationSets must resolve
    checker.check_applications(&args.base_dir, &args.apps)?;
    // every component must be complete and still build
    checker.check_components(&args.base_dir, &args.components)?;
    Ok(())
}
