//! AppMessage enum for async communication within the application.

use crate::models::RunSnapshot;

/// Messages sent to the render loop by background tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A poll completed; the snapshot replaces everything on screen
    SnapshotLoaded(Box<RunSnapshot>),
    /// A poll failed; the previous snapshot stays on screen
    RefreshFailed {
        /// Text for the status bar
        error: String,
        retryable: bool,
    },
    /// Stop the render loop
    Quit,
}
