use std::env;
use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use strum::{Display, EnumString};

use crate::command::RunCommand;
use crate::ExecStatus;

/// Build configuration passed to the configure and build steps.
#[derive(Display, EnumString, Debug, Default, PartialEq, Eq, Hash, Copy, Clone)]
#[strum(ascii_case_insensitive)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
    RelWithDebInfo,
    MinSizeRel,
}

/// Determine the cmake program to run, allowing `$CMAKE` overrides.
fn program() -> String {
    env::var("CMAKE").unwrap_or_else(|_| "cmake".to_string())
}

/// Configure a source tree into a build directory.
#[derive(Debug, Clone)]
pub struct Configure {
    source: Utf8PathBuf,
    build: Utf8PathBuf,
    build_type: BuildType,
    defines: IndexMap<String, String>,
}

impl Configure {
    /// Create a configure invocation for a source and build directory pair.
    pub fn new<S, B>(source: S, build: B) -> Self
    where
        S: AsRef<Utf8Path>,
        B: AsRef<Utf8Path>,
    {
        Self {
            source: source.as_ref().to_path_buf(),
            build: build.as_ref().to_path_buf(),
            build_type: Default::default(),
            defines: Default::default(),
        }
    }

    /// Set the build configuration.
    pub fn build_type(mut self, value: BuildType) -> Self {
        self.build_type = value;
        self
    }

    /// Add a cache entry, overriding earlier values for the same variable.
    pub fn define<K, V>(mut self, var: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.defines.insert(var.into(), value.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(program());
        cmd.arg("-S").arg(&self.source).arg("-B").arg(&self.build);
        cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type));
        for (var, value) in &self.defines {
            cmd.arg(format!("-D{var}={value}"));
        }
        cmd
    }

    /// Run the configure step, returning its exit status.
    pub fn run(&self) -> crate::Result<ExecStatus> {
        self.command().run()
    }
}

/// Build a previously configured build directory.
#[derive(Debug, Clone)]
pub struct Build {
    dir: Utf8PathBuf,
    build_type: BuildType,
    jobs: Option<usize>,
}

impl Build {
    /// Create a build invocation for a build directory.
    pub fn new<P: AsRef<Utf8Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            build_type: Default::default(),
            jobs: None,
        }
    }

    /// Set the build configuration.
    pub fn build_type(mut self, value: BuildType) -> Self {
        self.build_type = value;
        self
    }

    /// Set the number of parallel build jobs.
    pub fn jobs(mut self, value: usize) -> Self {
        self.jobs = Some(value);
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(program());
        cmd.arg("--build").arg(&self.dir);
        cmd.arg("--config").arg(self.build_type.to_string());
        if let Some(jobs) = self.jobs {
            cmd.arg("--parallel").arg(jobs.to_string());
        }
        cmd
    }

    /// Run the build step, returning its exit status.
    pub fn run(&self) -> crate::Result<ExecStatus> {
        self.command().run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_types() {
        assert_eq!(BuildType::default(), BuildType::Release);
        assert_eq!(BuildType::RelWithDebInfo.to_string(), "RelWithDebInfo");
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!("MinSizeRel".parse::<BuildType>().unwrap(), BuildType::MinSizeRel);
        assert!("optimized".parse::<BuildType>().is_err());
    }

    #[test]
    fn configure_args() {
        let cmd = Configure::new("/proj", "/proj/build").command();
        assert_eq!(
            cmd.to_vec()[1..],
            ["-S", "/proj", "-B", "/proj/build", "-DCMAKE_BUILD_TYPE=Release"]
        );

        // defines follow the build type in insertion order
        let cmd = Configure::new("/proj", "/proj/build")
            .build_type(BuildType::Debug)
            .define("CMAKE_EXPORT_COMPILE_COMMANDS", "ON")
            .define("FOO", "bar")
            .command();
        assert_eq!(
            cmd.to_vec()[1..],
            [
                "-S",
                "/proj",
                "-B",
                "/proj/build",
                "-DCMAKE_BUILD_TYPE=Debug",
                "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON",
                "-DFOO=bar",
            ]
        );
    }

    #[test]
    fn build_args() {
        let cmd = Build::new("/proj/build").command();
        assert_eq!(cmd.to_vec()[1..], ["--build", "/proj/build", "--config", "Release"]);

        let cmd = Build::new("/proj/build")
            .build_type(BuildType::Debug)
            .jobs(4)
            .command();
        assert_eq!(
            cmd.to_vec()[1..],
            ["--build", "/proj/build", "--config", "Debug", "--parallel", "4"]
        );
    }

    #[test]
    fn program_override() {
        env::set_var("CMAKE", "cmake3");
        assert_eq!(Build::new("build").command().to_vec()[0], "cmake3");
        env::remove_var("CMAKE");
        assert_eq!(Build::new("build").command().to_vec()[0], "cmake");
    }
}
