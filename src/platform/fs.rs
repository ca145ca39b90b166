// SeqSleuth - platform/fs.rs
//
// Filesystem helpers. The core layer never opens files itself; the app
// layer reads content here and hands the string to the parser.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion so that a single bad
/// byte costs one line rather than the whole file.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e.utf8_error(),
                "Log file is not valid UTF-8; invalid bytes replaced"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
