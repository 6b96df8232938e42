use std::io::Error;

use thiserror::Error;

/// Width of a tab stop used by the tab-aligned version and team tables.
pub const TAB_WIDTH: usize = 8;
/// Number of spaces between two columns in the rich table.
pub const COL_PADDING: usize = 1;
/// Maximum display width of a column in the rich table.
pub const MAX_COL_WIDTH: usize = 60;
/// Maximum display width of a title (summary, sprint name) in fixed width output.
pub const MAX_TITLE_WIDTH: usize = 50;

pub const HELP_TEXT: &str = "
USAGE
-----

The layout contains 2 sections: the sidebar on the left and the contents on the right.

  Up/Down, j/k      move through the sidebar
  g / G             jump to the first / last sprint
  Enter, l, Right   open the highlighted sprint
  Esc, h, Left      go back to the sidebar
  Enter (contents)  open the selected issue in the browser
  c                 copy the selected issue row to the clipboard
  q, Ctrl-C         quit

Select '?' in the sidebar to see this help again.
";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("unable to open browser: {0}")]
    Browser(String),
    #[error("file not found")]
    FileNotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("loading failed: {0}")]
    LoadingFailed(String),
}

/// Settings of the interactive explorer.
#[derive(Debug, Clone)]
pub struct TVConfig {
    pub event_poll_time: u64,
}

impl Default for TVConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
        }
    }
}

/// Messages the controller emits for the navigator model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveBeginning,
    MoveEnd,
    Enter,
    Exit,
    Help,
    CopyRow,
}
