//! Filesystem helpers shared by asset and page persistence.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Write `bytes` to `path` through a `.partial` sibling and a final rename,
/// so cancellation never leaves a torn file at the destination.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut partial_name = OsString::from(path.as_os_str());
    partial_name.push(".partial");
    let partial = PathBuf::from(partial_name);

    if let Err(err) = fs::write(&partial, bytes).await {
        let _ = fs::remove_file(&partial).await;
        return Err(err);
    }
    fs::rename(&partial, path).await
}
