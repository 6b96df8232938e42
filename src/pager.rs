//! Scoped pager: output that does not fit the screen is piped through an external pager.

use std::env;
use std::io::{self, ErrorKind, Write};
use std::process::{Child, Command, Stdio};

use is_terminal::IsTerminal;
use tracing::{debug, warn};

use crate::domain::ViewError;

const DEFAULT_PAGER: &str = "less -R";

/// Prints `content` to stdout, paging it when stdout is a terminal too small to hold it.
pub fn page_out(content: &str) -> Result<(), ViewError> {
    let interactive = io::stdout().is_terminal();
    let height = terminal_size::terminal_size().map(|(_, terminal_size::Height(h))| h as usize);

    if interactive && !fits(content, height) {
        if let Some(pager) = ScopedPager::spawn(&pager_command()) {
            return pager.write(content);
        }
    }

    let mut stdout = io::stdout().lock();
    write_direct(&mut stdout, content)
}

fn write_direct<W: Write>(w: &mut W, content: &str) -> Result<(), ViewError> {
    match w.write_all(content.as_bytes()).and_then(|_| w.flush()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

/// Whether `content` fits a screen of `height` lines. An unknown height always fits.
pub fn fits(content: &str, height: Option<usize>) -> bool {
    match height {
        Some(h) => content.lines().count() < h,
        None => true,
    }
}

/// The pager to run: `JIRA_PAGER`, then `PAGER`, then `less -R`.
/// An empty value disables paging.
pub fn pager_command() -> Vec<String> {
    let cmd = env::var("JIRA_PAGER")
        .or_else(|_| env::var("PAGER"))
        .unwrap_or_else(|_| DEFAULT_PAGER.to_string());
    cmd.split_whitespace().map(str::to_string).collect()
}

/// A running pager process. The process is waited on when the guard goes out of scope,
/// whichever way that happens.
pub struct ScopedPager {
    child: Option<Child>,
}

impl ScopedPager {
    /// Starts the pager, or returns `None` when it cannot run so the caller prints directly.
    pub fn spawn(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
        {
            Ok(child) => {
                debug!("Spawned pager {program}");
                Some(Self { child: Some(child) })
            }
            Err(e) => {
                warn!("Pager {program} unavailable: {e}");
                None
            }
        }
    }

    /// Feeds `content` to the pager and waits until the user leaves it.
    pub fn write(mut self, content: &str) -> Result<(), ViewError> {
        if let Some(stdin) = self.child.as_mut().and_then(|c| c.stdin.as_mut()) {
            write_direct(stdin, content)?;
        }
        self.close()
    }

    fn close(&mut self) -> Result<(), ViewError> {
        if let Some(mut child) = self.child.take() {
            // Closing stdin signals end of input.
            drop(child.stdin.take());
            let status = child.wait()?;
            debug!("Pager exited with {status}");
        }
        Ok(())
    }
}

impl Drop for ScopedPager {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to wait on pager: {e}");
        }
    }
}
