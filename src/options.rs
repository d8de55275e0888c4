//! Per-call capture configuration.
//!
//! The engine takes an explicit `CaptureOptions` value on every request
//! instead of consulting process-wide state, so two callers with different
//! settings never interfere.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Ellipse size used to synthesize rounded window corners when the OS
/// reports no native region. 9 matches the classic bordered-window chrome;
/// callers targeting other themes can override it per call.
pub const DEFAULT_CORNER_DIAMETER: u32 = 9;

/// Settings applied to a single capture request.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Draw the live mouse cursor onto the capture, hotspot-aligned.
    pub include_cursor: bool,
    /// Capture layered and obscured content instead of only the visible
    /// composited surface (adds CAPTUREBLT to the block copy).
    pub include_obscured: bool,
    /// RGBA fill painted over everything outside the target window's
    /// silhouette. `None` disables shape masking entirely.
    pub shape_fill: Option<[u8; 4]>,
    /// Corner ellipse size for the synthesized rounded-rectangle region.
    pub corner_diameter: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            include_cursor: false,
            include_obscured: false,
            shape_fill: None,
            corner_diameter: DEFAULT_CORNER_DIAMETER,
        }
    }
}

impl CaptureOptions {
    /// Loads options from a JSON file, falling back to defaults for any
    /// missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse options from {}", path.display()))
    }

    /// Writes options as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize options")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write options to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let opts = CaptureOptions::default();
        assert!(!opts.include_cursor);
        assert!(!opts.include_obscured);
        assert_eq!(opts.shape_fill, None);
        assert_eq!(opts.corner_diameter, DEFAULT_CORNER_DIAMETER);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let opts: CaptureOptions = serde_json::from_str(r#"{"include_cursor": true}"#).unwrap();
        assert!(opts.include_cursor);
        assert_eq!(opts.corner_diameter, DEFAULT_CORNER_DIAMETER);
        assert_eq!(opts.shape_fill, None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");

        let opts = CaptureOptions {
            include_cursor: true,
            include_obscured: true,
            shape_fill: Some([255, 0, 255, 255]),
            corner_diameter: 12,
        };
        opts.save(&path).unwrap();

        let loaded = CaptureOptions::load(&path).unwrap();
        assert!(loaded.include_cursor);
        assert!(loaded.include_obscured);
        assert_eq!(loaded.shape_fill, Some([255, 0, 255, 255]));
        assert_eq!(loaded.corner_diameter, 12);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(CaptureOptions::load(&dir.path().join("absent.json")).is_err());
    }
}
