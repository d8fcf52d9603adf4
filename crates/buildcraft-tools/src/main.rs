use std::io::stderr;
use std::process::ExitCode;

use buildcraft::cmake::BuildType;
use buildcraft::launch::Launcher;
use camino::Utf8PathBuf;
use clap::Parser;
use clap_verbosity_flag::{log::LevelFilter, Verbosity};
use tracing_log::AsTrace;

#[derive(Debug, Parser)]
#[command(version, long_about = None, disable_help_subcommand = true)]
/// Configure and build a project tree with cmake.
struct Command {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Source directory to configure
    #[arg(short, long, value_name = "PATH")]
    source_dir: Option<Utf8PathBuf>,

    /// Build directory to generate into
    #[arg(short, long, value_name = "PATH")]
    build_dir: Option<Utf8PathBuf>,

    /// Build configuration passed to cmake
    #[arg(short = 't', long, default_value_t, value_name = "TYPE")]
    build_type: BuildType,

    /// Parallel build jobs
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Extra cache entries for the configure step
    #[arg(short = 'D', value_name = "VAR=VALUE")]
    defines: Vec<String>,
}

/// Limit parallel jobs to the number of logical CPUs on a system.
fn bounded_jobs(jobs: usize) -> anyhow::Result<usize> {
    let cpus = num_cpus::get();
    match jobs {
        0 => anyhow::bail!("jobs must be a positive integer"),
        j if j <= cpus => Ok(j),
        _ => Ok(cpus),
    }
}

impl Command {
    fn run(self) -> anyhow::Result<ExitCode> {
        let mut launcher = match self.source_dir {
            Some(path) => Launcher::new(path),
            None => Launcher::from_exe_dir()?,
        }
        .build_type(self.build_type);
        if let Some(path) = self.build_dir {
            launcher = launcher.build_dir(path);
        }
        if let Some(jobs) = self.jobs {
            launcher = launcher.jobs(bounded_jobs(jobs)?);
        }
        for define in &self.defines {
            let (var, value) = define
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("invalid cache entry: {define}"))?;
            launcher = launcher.define(var, value);
        }

        launcher.run()?;
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Command::parse();

    // custom log event formatter that disables target prefixes by default
    let level = args.verbosity.log_level_filter();
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(level > LevelFilter::Info)
        .without_time()
        .compact();

    tracing_subscriber::fmt()
        .event_format(format)
        .with_max_level(level.as_trace())
        .with_writer(stderr)
        .init();

    args.run().or_else(|err| {
        eprintln!("bld: error: {err}");
        Ok(ExitCode::from(2))
    })
}
