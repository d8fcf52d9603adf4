use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use tracing::warn;

use crate::cmake::{Build, BuildType, Configure};
use crate::{files, utils, ExecStatus};

/// Exit statuses of the two steps issued by a launcher run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Summary {
    pub configure: ExecStatus,
    pub build: ExecStatus,
}

impl Summary {
    /// Return true if both steps exited successfully.
    pub fn success(&self) -> bool {
        self.configure.success() && self.build.success()
    }
}

/// Configure and build a source tree into a build directory.
#[derive(Debug, Clone)]
pub struct Launcher {
    source_dir: Utf8PathBuf,
    build_dir: Utf8PathBuf,
    build_type: BuildType,
    jobs: Option<usize>,
    defines: IndexMap<String, String>,
}

impl Launcher {
    /// Create a launcher for a source tree, generating into its `build` subdirectory.
    pub fn new<P: AsRef<Utf8Path>>(source_dir: P) -> Self {
        let source_dir = source_dir.as_ref().to_path_buf();
        let build_dir = source_dir.join("build");
        Self {
            source_dir,
            build_dir,
            build_type: Default::default(),
            jobs: None,
            defines: Default::default(),
        }
    }

    /// Create a launcher rooted at the running executable's directory.
    pub fn from_exe_dir() -> crate::Result<Self> {
        Ok(Self::new(utils::exe_dir()?))
    }

    /// Override the build directory.
    pub fn build_dir<P: AsRef<Utf8Path>>(mut self, value: P) -> Self {
        self.build_dir = value.as_ref().to_path_buf();
        self
    }

    /// Set the build configuration for both steps.
    pub fn build_type(mut self, value: BuildType) -> Self {
        self.build_type = value;
        self
    }

    /// Set the number of parallel build jobs.
    pub fn jobs(mut self, value: usize) -> Self {
        self.jobs = Some(value);
        self
    }

    /// Add a cache entry for the configure step.
    pub fn define<K, V>(mut self, var: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.defines.insert(var.into(), value.into());
        self
    }

    /// Run the configure and build steps in order.
    ///
    /// The build directory is created if missing before anything is run. Both
    /// steps are always issued, a failing configure step doesn't suppress the
    /// build step. Nonzero exit statuses are reported via the summary instead
    /// of erroring out, matching the behavior of invoking cmake manually.
    pub fn run(&self) -> crate::Result<Summary> {
        files::ensure_dir(&self.build_dir)?;

        let mut step = Configure::new(&self.source_dir, &self.build_dir).build_type(self.build_type);
        for (var, value) in &self.defines {
            step = step.define(var, value);
        }
        let configure = step.run()?;
        if let ExecStatus::Failure(n) = configure {
            warn!("configure step failed: exit status {n}");
        }

        let mut step = Build::new(&self.build_dir).build_type(self.build_type);
        if let Some(jobs) = self.jobs {
            step = step.jobs(jobs);
        }
        let build = step.run()?;
        if let ExecStatus::Failure(n) = build {
            warn!("build step failed: exit status {n}");
        }

        Ok(Summary { configure, build })
    }
}
