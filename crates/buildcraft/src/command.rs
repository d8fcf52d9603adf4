use std::process::{Command, ExitStatus};

use itertools::Itertools;
use tracing::info;

/// Exit status of an executed external command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExecStatus {
    Success,
    Failure(i32),
}

impl ExecStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExecStatus::Success)
    }
}

impl From<ExitStatus> for ExecStatus {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            ExecStatus::Success
        } else {
            ExecStatus::Failure(status.code().unwrap_or(-1))
        }
    }
}

#[cfg(test)]
thread_local! {
    static COMMANDS: std::cell::RefCell<Vec<Vec<String>>> = Default::default();
}

/// Drain the commands recorded by `RunCommand::run()` on the current thread.
#[cfg(test)]
pub(crate) fn commands() -> Vec<Vec<String>> {
    COMMANDS.with(|c| c.take())
}

pub(crate) trait RunCommand {
    /// Return the program and its arguments as a string vector.
    fn to_vec(&self) -> Vec<String>;
    /// Run the command, returning its exit status.
    fn run(&mut self) -> crate::Result<ExecStatus>;
}

impl RunCommand for Command {
    fn to_vec(&self) -> Vec<String> {
        std::iter::once(self.get_program())
            .chain(self.get_args())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    fn run(&mut self) -> crate::Result<ExecStatus> {
        info!("{}", self.to_vec().iter().join(" "));

        // record commands instead of executing them
        #[cfg(test)]
        {
            COMMANDS.with(|c| c.borrow_mut().push(self.to_vec()));
            Ok(ExecStatus::Success)
        }

        #[cfg(not(test))]
        self.status().map(ExecStatus::from).map_err(|e| {
            let program = self.get_program().to_string_lossy();
            crate::Error::Command(format!("failed running {program}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_vec() {
        let mut cmd = Command::new("prog");
        cmd.args(["-a", "1", "--opt=val", "/path/to dir"]);
        assert_eq!(cmd.to_vec(), ["prog", "-a", "1", "--opt=val", "/path/to dir"]);
    }

    #[test]
    fn recorded() {
        let mut cmd = Command::new("prog");
        cmd.arg("arg");
        assert_eq!(cmd.run().unwrap(), ExecStatus::Success);
        assert_eq!(commands(), [["prog", "arg"]]);
        // drained on access
        assert!(commands().is_empty());
    }

    #[test]
    fn status_conversion() {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(ExecStatus::from(ExitStatus::from_raw(0)), ExecStatus::Success);
        let status = ExecStatus::from(ExitStatus::from_raw(256));
        assert_eq!(status, ExecStatus::Failure(1));
        assert!(!status.success());
    }
}
