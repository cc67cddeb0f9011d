//! Optional window assets.
//!
//! Missing or unusable assets are never fatal: they are logged as
//! [`StartupError::ResourceMissing`] and the host falls back to its
//! defaults.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StartupError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A loaded window icon (PNG bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconAsset {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Loads a PNG icon, or `None` if it is missing or not a PNG.
pub fn try_load(path: &Path) -> Option<IconAsset> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = StartupError::ResourceMissing(format!("{}: {}", path.display(), e));
            warn!(error = %err, "Application icon not found, using default");
            return None;
        }
    };

    if !bytes.starts_with(&PNG_SIGNATURE) {
        let err = StartupError::ResourceMissing(format!("{}: not a PNG image", path.display()));
        warn!(error = %err, "Application icon unusable, using default");
        return None;
    }

    debug!(path = %path.display(), size = bytes.len(), "Loaded application icon");
    Some(IconAsset {
        path: path.to_path_buf(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_icon() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(try_load(&dir.path().join("icon.png")), None);
    }

    #[test]
    fn test_not_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"GIF89a").unwrap();
        assert_eq!(try_load(&path), None);
    }

    #[test]
    fn test_png_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        std::fs::write(&path, &bytes).unwrap();

        let icon = try_load(&path).unwrap();
        assert_eq!(icon.bytes, bytes);
        assert_eq!(icon.path, path);
    }
}
