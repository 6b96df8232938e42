use std::io::{self, Write};

use is_terminal::IsTerminal;
use tracing::{debug, info_span};

use super::navigate;
use crate::columns::{ColumnId, IssueColumn, SprintColumn, resolve};
use crate::domain::{COL_PADDING, MAX_COL_WIDTH, MAX_TITLE_WIDTH, TVConfig, ViewError};
use crate::format::{DateLayout, format_date_time_human, prepare_title, truncate};
use crate::jira::{Issue, Sprint};
use crate::model::{Content, Preview, PreviewEntry};
use crate::project::{TextStyle, tabularize};
use crate::table::{DisplayFormat, TableData, TableView, render_plain};
use crate::ui::TableUI;

/// Provides the issues of a sprint, by board and sprint id.
pub type SprintIssueFunc<'a> = Box<dyn Fn(u64, u64) -> Vec<Issue> + 'a>;

/// Sprints of a board, as a table or as an explorer with the issues of each sprint.
pub struct SprintList<'a> {
    pub project: String,
    pub board: String,
    pub server: String,
    pub data: Vec<Sprint>,
    pub issues: SprintIssueFunc<'a>,
    pub display: DisplayFormat,
}

impl<'a> SprintList<'a> {
    fn footer_text(&self) -> String {
        format!(
            "Showing {} results from board \"{}\" of project \"{}\"",
            self.data.len(),
            self.board,
            self.project
        )
    }

    /// The notice shown instead of an empty table or explorer.
    pub fn empty_notice(&self) -> Option<String> {
        self.data
            .is_empty()
            .then(|| format!("No sprint found for board \"{}\"", self.board))
    }

    /// Runs the interactive explorer.
    pub fn render(&self, cfg: &TVConfig) -> Result<(), ViewError> {
        let _span = info_span!("sprint_explorer", sprints = self.data.len()).entered();
        let mut preview = self.preview();
        TableUI::new().run(&mut preview, cfg)
    }

    /// The explorer model: one entry per sprint, issues loaded on first visit.
    pub fn preview(&self) -> Preview<'_> {
        Preview::new(self.entries())
            .with_footer_text(self.footer_text())
            .with_selected_func(navigate(&self.server))
    }

    /// Renders the sprints as a table.
    pub fn render_in_table(&self) -> Result<(), ViewError> {
        if self.display.plain {
            return self.render_plain(&mut io::stdout().lock());
        }
        TableView::new()
            .with_col_padding(COL_PADDING)
            .with_max_col_width(MAX_COL_WIDTH)
            .with_footer_text(self.footer_text())
            .with_colored(io::stdout().is_terminal())
            .render(&self.table_data())
    }

    pub fn render_plain<W: Write>(&self, w: &mut W) -> Result<(), ViewError> {
        render_plain(w, &self.table_data())
    }

    pub fn table_data(&self) -> TableData {
        let columns = resolve(self.display.columns.as_slice(), SprintColumn::ALL);
        tabularize(
            &self.data,
            &columns,
            TextStyle::from_plain(self.display.plain),
            self.display.with_header(),
        )
    }

    fn menu(sprint: &Sprint) -> String {
        format!(
            "➤ #{} {}: ⦗{} - {}⦘",
            sprint.id,
            truncate(&prepare_title(&sprint.name), MAX_TITLE_WIDTH),
            format_date_time_human(&sprint.start_date, DateLayout::Rfc3339),
            format_date_time_human(&sprint.end_date, DateLayout::Rfc3339),
        )
    }

    fn entries(&self) -> Vec<PreviewEntry<'_>> {
        self.data
            .iter()
            .map(|s| {
                let (bid, sid) = (s.board_id, s.id);
                let issues = &self.issues;
                PreviewEntry::new(
                    format!("{}-{}-{}", bid, sid, s.start_date),
                    Self::menu(s),
                    move |key: &str| {
                        debug!("Fetching issues of sprint {key}");
                        let list = issues(bid, sid);
                        Content::Table(tabularize(
                            &list,
                            IssueColumn::ALL,
                            TextStyle::Fixed,
                            true,
                        ))
                    },
                )
            })
            .collect()
    }
}
