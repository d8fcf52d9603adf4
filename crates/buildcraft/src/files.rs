use std::fs;

use camino::Utf8Path;

use crate::Error;

/// Create a directory and any missing parents unless it already exists.
pub(crate) fn ensure_dir<P: AsRef<Utf8Path>>(path: P) -> crate::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| Error::IO(format!("failed creating dir: {path}: {e}")))?;
    }
    Ok(())
}
