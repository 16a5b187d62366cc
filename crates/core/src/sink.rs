//! Writes converted payloads to a file or to a stream.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::document::Payload;
use crate::request::Destination;

/// Writes `payload` to `destination`. `stdout` receives stream output.
///
/// Text payloads sent to a stream are terminated with a newline.
pub fn write_payload(
    destination: &Destination,
    payload: &Payload,
    stdout: &mut dyn Write,
) -> io::Result<()> {
    match destination {
        Destination::File(path) => atomic_write(path, payload.as_bytes()),
        Destination::Stdout => {
            stdout.write_all(payload.as_bytes())?;
            if let Payload::Text(_) = payload {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()
        }
    }
}

/// Writes into a sibling temporary file, then renames it over `path`.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = temporary_path(path);
    let written = fs::write(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
