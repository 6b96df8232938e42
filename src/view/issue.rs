use std::io::{self, Write};

use is_terminal::IsTerminal;

use crate::columns::{ColumnId, IssueColumn, resolve};
use crate::domain::{COL_PADDING, MAX_COL_WIDTH, ViewError};
use crate::jira::Issue;
use crate::project::{TextStyle, tabularize};
use crate::table::{DisplayFormat, TableData, TableView, render_plain};

/// Issues of a search, as a table.
pub struct IssueList {
    pub project: String,
    pub data: Vec<Issue>,
    pub display: DisplayFormat,
}

impl IssueList {
    fn footer_text(&self) -> String {
        format!(
            "Showing {} results from project \"{}\"",
            self.data.len(),
            self.project
        )
    }

    /// The notice shown instead of an empty table.
    pub fn empty_notice(&self) -> Option<String> {
        self.data.is_empty().then(|| {
            format!("No result found for given query in project \"{}\"", self.project)
        })
    }

    pub fn render(&self) -> Result<(), ViewError> {
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
        let columns = resolve(self.display.columns.as_slice(), IssueColumn::ALL);
        tabularize(
            &self.data,
            &columns,
            TextStyle::from_plain(self.display.plain),
            self.display.with_header(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::{IssueFields, Named, User};
    use crate::view::render_or_notice;

    fn issues() -> Vec<Issue> {
        vec![
            Issue {
                key: "TEST-1".to_string(),
                fields: IssueFields {
                    summary: "Login\tfails on\nSafari".to_string(),
                    status: Named { name: "To Do".to_string() },
                    assignee: Some(User {
                        name: "jdoe".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            },
            Issue {
                key: "TEST-2".to_string(),
                fields: IssueFields {
                    summary: "Crash".to_string(),
                    status: Named { name: "Done".to_string() },
                    ..Default::default()
                },
                ..Default::default()
            },
        ]
    }

    #[test]
    fn selected_columns_in_requested_order() {
        let list = IssueList {
            project: "TEST".to_string(),
            data: issues(),
            display: DisplayFormat {
                plain: true,
                no_headers: false,
                columns: vec!["bogus".to_string(), "STATUS".to_string(), "key".to_string()],
            },
        };
        let mut buf = Vec::new();
        list.render_plain(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "STATUS\tKEY\nTo Do\tTEST-1\nDone\tTEST-2\n"
        );
    }

    #[test]
    fn plain_output_round_trips_through_tabs() {
        let list = IssueList {
            project: "TEST".to_string(),
            data: issues(),
            display: DisplayFormat {
                plain: true,
                ..Default::default()
            },
        };
        let mut buf = Vec::new();
        list.render_plain(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let parsed: TableData = out
            .lines()
            .map(|l| l.split('\t').map(str::to_string).collect())
            .collect();
        assert_eq!(parsed, list.table_data());
        assert_eq!(parsed[1][2], "Login fails on Safari");
        assert_eq!(parsed[1][4], "jdoe");
        assert_eq!(parsed[2][4], "");
    }

    #[test]
    fn unparseable_dates_do_not_split_cells() {
        let mut data = issues();
        data[0].fields.updated = "n/a\tunknown".to_string();
        data[1].fields.created = "soon\n".to_string();
        let list = IssueList {
            project: "TEST".to_string(),
            data,
            display: DisplayFormat {
                plain: true,
                ..Default::default()
            },
        };
        let mut buf = Vec::new();
        list.render_plain(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let parsed: TableData = out
            .lines()
            .map(|l| l.split('\t').map(str::to_string).collect())
            .collect();
        assert_eq!(parsed.len(), 3);
        assert!(parsed.iter().all(|row| row.len() == IssueColumn::ALL.len()));
        assert_eq!(parsed, list.table_data());
        assert_eq!(parsed[1][9], "n/a unknown");
    }

    #[test]
    fn empty_result_prints_only_the_notice() {
        let list = IssueList {
            project: "TEST".to_string(),
            data: Vec::new(),
            display: DisplayFormat {
                plain: true,
                ..Default::default()
            },
        };
        let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
        render_or_notice(&mut err, list.empty_notice(), || list.render_plain(&mut out)).unwrap();

        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("No result found for given query in project \"TEST\""));
        assert!(!err.contains("KEY"));

        let list = IssueList {
            data: issues(),
            ..list
        };
        assert_eq!(list.empty_notice(), None);
    }

    #[test]
    fn footer_counts_results() {
        let list = IssueList {
            project: "TEST".to_string(),
            data: issues(),
            display: DisplayFormat::default(),
        };
        assert_eq!(list.footer_text(), "Showing 2 results from project \"TEST\"");
    }
}
