pub mod fmt;
pub mod init;
pub mod inspect;
pub mod roundtrip;

use std::io::Read;
use std::path::Path;

use slack_attachments::error::{AttachmentError, Result};

/// Read a document from a file, or from stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    std::fs::read(path).map_err(|e| AttachmentError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
