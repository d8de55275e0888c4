//! Error taxonomy for capture operations.

use thiserror::Error;

/// Failures surfaced to callers of the capture entry points.
///
/// Cursor-related failures never appear here: cursor inclusion is a
/// cosmetic enhancement and is absorbed inside the overlay step.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The live display surface could not be acquired or the pixel
    /// transfer failed. Non-recoverable for the call; no partial buffer
    /// is returned.
    #[error("display surface unavailable: {0}")]
    CaptureUnavailable(#[source] anyhow::Error),

    /// The target window handle no longer resolves to a live window.
    /// Masking aborts before any paint occurs.
    #[error("target window no longer exists")]
    WindowUnavailable,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_capture_unavailable_carries_cause() {
        let err = CaptureError::CaptureUnavailable(anyhow!("BitBlt failed"));
        let msg = format!("{err}");
        assert!(msg.contains("display surface unavailable"));
        assert!(msg.contains("BitBlt failed"));
    }

    #[test]
    fn test_window_unavailable_message() {
        let msg = format!("{}", CaptureError::WindowUnavailable);
        assert_eq!(msg, "target window no longer exists");
    }
}
