//! Per-entity views wiring records, columns, projection and renderers together.

mod issue;
mod sprint;
mod team;
mod version;
mod worklog;

pub use issue::IssueList;
pub use sprint::SprintList;
pub use team::{TeamFormat, display_teams};
pub use version::VersionView;
pub use worklog::WorklogView;

use std::io::{self, Write};
use std::process::{Command, Stdio};

use owo_colors::OwoColorize;
use tracing::debug;

use crate::domain::ViewError;

/// Writes a failure notice.
fn write_failed<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "\u{2717}".red(), msg.red())
}

/// Runs `render`, unless `notice` tells there is nothing to show. Then only the
/// notice is written, to `notice_to`.
pub fn render_or_notice<W: Write>(
    notice_to: &mut W,
    notice: Option<String>,
    render: impl FnOnce() -> Result<(), ViewError>,
) -> Result<(), ViewError> {
    match notice {
        Some(msg) => Ok(write_failed(notice_to, &msg)?),
        None => render(),
    }
}

/// Link to an issue in the web UI.
pub fn issue_url(server: &str, key: &str) -> String {
    format!("{}/browse/{}", server.trim_end_matches('/'), key)
}

/// Opens the issue in the selected row in the browser. The row must carry a `KEY` column.
pub fn navigate(server: &str) -> impl FnMut(&[String], &[String]) -> Result<(), ViewError> + '_ {
    move |header: &[String], row: &[String]| {
        let key = header
            .iter()
            .position(|h| h == "KEY")
            .and_then(|idx| row.get(idx))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ViewError::Browser("the selected row has no issue key".to_string()))?;
        open_in_browser(&issue_url(server, key))
    }
}

/// Opens `url` with the platform's default handler.
pub fn open_in_browser(url: &str) -> Result<(), ViewError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ViewError::Browser(format!("refusing to open {url}")));
    }
    debug!("Opening {url}");

    #[cfg(target_os = "macos")]
    let mut cmd = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut cmd = Command::new("xdg-open");

    cmd.arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ViewError::Browser(e.to_string()))?;
    Ok(())
}
