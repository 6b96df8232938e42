use std::io::Write;

use owo_colors::{OwoColorize, Style};

use crate::domain::ViewError;
use crate::format::{DateLayout, format_date_time_human};
use crate::jira::Worklog;
use crate::tempo::WorklogWithTempo;

/// Worklogs of an issue, most recent first.
///
/// The order is taken as given: the first worklog is labelled as the latest.
pub struct WorklogView<'w> {
    worklogs: &'w [WorklogWithTempo],
    colored: bool,
}

impl From<Worklog> for WorklogWithTempo {
    fn from(worklog: Worklog) -> Self {
        Self {
            worklog,
            ..Default::default()
        }
    }
}

fn human(dt: &str) -> String {
    format_date_time_human(dt, DateLayout::Jira)
}

impl<'w> WorklogView<'w> {
    pub fn new(worklogs: &'w [WorklogWithTempo], colored: bool) -> Self {
        Self { worklogs, colored }
    }

    pub fn empty_notice(&self) -> Option<String> {
        self.worklogs
            .is_empty()
            .then(|| "No worklogs found".to_string())
    }

    pub fn render<W: Write>(&self, w: &mut W, plain: bool) -> Result<(), ViewError> {
        if plain {
            self.render_plain(w)
        } else {
            self.render_formatted(w)
        }
    }

    fn colored_out(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn render_plain<W: Write>(&self, w: &mut W) -> Result<(), ViewError> {
        for entry in self.worklogs {
            let worklog = &entry.worklog;
            let author = worklog.author.label();

            writeln!(w, "ID: {}", worklog.id)?;
            writeln!(w, "Author: {author}")?;
            writeln!(
                w,
                "Time Spent: {} ({} seconds)",
                worklog.time_spent, worklog.time_spent_seconds
            )?;
            writeln!(w, "Started: {}", human(&worklog.started))?;
            writeln!(w, "Created: {}", human(&worklog.created))?;

            if worklog.is_updated() {
                writeln!(w, "Updated: {}", human(&worklog.updated))?;
                let update_author = worklog.update_author.label();
                if update_author != author {
                    writeln!(w, "Update Author: {update_author}")?;
                }
            }

            if !worklog.comment.is_empty() {
                writeln!(w, "Comment: {}", worklog.comment)?;
            }

            if let Some(billable) = entry.billable_seconds {
                writeln!(w, "Billable: {billable} seconds")?;
            }
            if !entry.tempo_attributes.is_empty() {
                writeln!(w, "Attributes:")?;
                for attr in &entry.tempo_attributes {
                    writeln!(w, "  {}: {}", attr.key, attr.value)?;
                }
            }

            writeln!(w, "---")?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn render_formatted<W: Write>(&self, w: &mut W) -> Result<(), ViewError> {
        if self.worklogs.is_empty() {
            return Ok(());
        }

        let bold = Style::new().white().bold();
        let gray = Style::new().bright_black();
        writeln!(
            w,
            "\n{} Worklogs",
            self.colored_out(&self.worklogs.len().to_string(), bold)
        )?;

        for (i, entry) in self.worklogs.iter().enumerate() {
            let worklog = &entry.worklog;

            let mut meta = format!(
                "\n {} • {} • {} • {}",
                self.colored_out(worklog.author.label(), bold),
                self.colored_out(&worklog.time_spent, Style::new().cyan().bold()),
                self.colored_out(&human(&worklog.started), bold),
                self.colored_out(&format!("ID: {}", worklog.id), Style::new().green()),
            );
            if worklog.is_updated() {
                meta.push_str(&format!(
                    " • {}",
                    self.colored_out(
                        &format!("Updated by {}", worklog.update_author.label()),
                        Style::new().yellow()
                    )
                ));
            }
            if i == 0 {
                meta.push_str(&format!(
                    " • {}",
                    self.colored_out("Latest worklog", Style::new().magenta().bold())
                ));
            }
            writeln!(w, "{meta}")?;

            let comment = worklog.comment.trim();
            if !comment.is_empty() {
                writeln!(w, "\n{comment}")?;
            }

            let mut details = format!(
                "\n    {}: {} seconds | {}: {} | {}: {}",
                self.colored_out("Time", gray),
                worklog.time_spent_seconds,
                self.colored_out("Created", gray),
                human(&worklog.created),
                self.colored_out("Issue ID", gray),
                worklog.issue_id,
            );
            if let Some(billable) = entry.billable_seconds {
                details.push_str(&format!(
                    " | {}: {billable} seconds",
                    self.colored_out("Billable", gray)
                ));
            }
            writeln!(w, "{details}")?;

            if !entry.tempo_attributes.is_empty() {
                let attrs = entry
                    .tempo_attributes
                    .iter()
                    .map(|a| format!("{}={}", a.key, a.value))
                    .collect::<Vec<String>>()
                    .join(", ");
                writeln!(w, "    {}: {attrs}", self.colored_out("Attributes", gray))?;
            }

            if i < self.worklogs.len() - 1 {
                writeln!(w)?;
            }
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::User;
    use crate::tempo::TempoAttribute;
    use crate::view::render_or_notice;

    fn user(name: &str) -> User {
        User {
            name: name.to_lowercase(),
            display_name: name.to_string(),
            ..Default::default()
        }
    }

    fn worklogs() -> Vec<WorklogWithTempo> {
        vec![
            Worklog {
                id: "100".to_string(),
                issue_id: "10001".to_string(),
                author: user("Alice"),
                update_author: user("Bob"),
                comment: "  Reviewed the patch  ".to_string(),
                created: "2024-03-04T10:00:00.000+0000".to_string(),
                updated: "2024-03-05T09:30:00.000+0000".to_string(),
                started: "2024-03-04T09:00:00.000+0000".to_string(),
                time_spent: "1h".to_string(),
                time_spent_seconds: 3600,
                ..Default::default()
            }
            .into(),
            Worklog {
                id: "99".to_string(),
                issue_id: "10001".to_string(),
                author: user("Alice"),
                update_author: user("Alice"),
                created: "2024-03-01T10:00:00.000+0000".to_string(),
                updated: "2024-03-01T10:00:00.000+0000".to_string(),
                started: "2024-03-01T08:00:00.000+0000".to_string(),
                time_spent: "30m".to_string(),
                time_spent_seconds: 1800,
                ..Default::default()
            }
            .into(),
        ]
    }

    fn rendered(worklogs: &[WorklogWithTempo], plain: bool) -> String {
        let mut buf = Vec::new();
        WorklogView::new(worklogs, false).render(&mut buf, plain).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_shows_updates_only_for_updated_worklogs() {
        let out = rendered(&worklogs(), true);
        let blocks: Vec<&str> = out.split("---\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 2);

        assert!(blocks[0].contains("Updated: Tue, 05 Mar 24\n"));
        assert!(blocks[0].contains("Update Author: Bob\n"));
        assert!(blocks[0].contains("Comment:   Reviewed the patch  \n"));
        assert!(!blocks[1].contains("Updated"));
        assert!(!blocks[1].contains("Comment"));
        assert!(blocks[1].contains("Time Spent: 30m (1800 seconds)\n"));
    }

    #[test]
    fn formatted_marks_update_and_latest_worklog() {
        let out = rendered(&worklogs(), false);
        let metas: Vec<&str> = out.lines().filter(|l| l.starts_with(" Alice")).collect();
        assert_eq!(metas.len(), 2);

        assert_eq!(
            metas[0],
            " Alice • 1h • Mon, 04 Mar 24 • ID: 100 • Updated by Bob • Latest worklog"
        );
        assert_eq!(metas[1], " Alice • 30m • Fri, 01 Mar 24 • ID: 99");
        assert!(out.starts_with("\n2 Worklogs\n"));
        assert!(out.contains("\nReviewed the patch\n"));
    }

    #[test]
    fn formatted_output_is_colored_on_request() {
        let mut buf = Vec::new();
        WorklogView::new(&worklogs(), true)
            .render(&mut buf, false)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\x1b["));
        assert!(out.contains("Latest worklog"));
    }

    #[test]
    fn nothing_is_printed_for_no_worklogs() {
        assert_eq!(rendered(&[], false), "");
        assert_eq!(rendered(&[], true), "");
    }

    #[test]
    fn no_worklogs_print_only_the_notice() {
        let view = WorklogView::new(&[], false);
        for plain in [true, false] {
            let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
            render_or_notice(&mut err, view.empty_notice(), || view.render(&mut out, plain))
                .unwrap();
            assert!(out.is_empty());
            let err = String::from_utf8(err).unwrap();
            assert_eq!(err.matches("No worklogs found").count(), 1);
        }
        assert_eq!(WorklogView::new(&worklogs(), false).empty_notice(), None);
    }

    #[test]
    fn tempo_details_are_listed() {
        let mut logs = worklogs();
        logs[1].billable_seconds = Some(900);
        logs[1].tempo_attributes = vec![TempoAttribute {
            key: "_Account_".to_string(),
            value: "OPS".to_string(),
        }];

        let plain = rendered(&logs, true);
        assert!(plain.contains("Billable: 900 seconds\nAttributes:\n  _Account_: OPS\n"));

        let formatted = rendered(&logs, false);
        assert!(formatted.contains("| Billable: 900 seconds"));
        assert!(formatted.contains("    Attributes: _Account_=OPS"));
    }
}
