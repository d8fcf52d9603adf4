use std::env;

use camino::Utf8PathBuf;

use crate::Error;

/// Get the symlink-resolved directory containing the running executable.
pub fn exe_dir() -> crate::Result<Utf8PathBuf> {
    let exe = env::current_exe().and_then(|path| path.canonicalize())?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::InvalidValue(format!("executable path has no parent: {exe:?}")))?;
    Utf8PathBuf::from_path_buf(dir.to_path_buf())
        .map_err(|p| Error::InvalidValue(format!("invalid unicode path: {p:?}")))
}
