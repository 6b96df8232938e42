//! Projection of records onto display rows.

use crate::columns::{ColumnId, IssueColumn, SprintColumn, header};
use crate::domain::MAX_TITLE_WIDTH;
use crate::format::{DateLayout, format_date_time, prepare_title, single_line, truncate};
use crate::jira::{Issue, Named, Sprint, User};
use crate::table::TableData;

/// How free text is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextStyle {
    /// Full text, for tab-delimited output.
    Plain,
    /// Titles cut to a fixed width, for aligned output.
    Fixed,
}

impl TextStyle {
    pub fn from_plain(plain: bool) -> Self {
        if plain { TextStyle::Plain } else { TextStyle::Fixed }
    }

    fn title(self, text: &str) -> String {
        let title = prepare_title(text);
        match self {
            TextStyle::Plain => title,
            TextStyle::Fixed => truncate(&title, MAX_TITLE_WIDTH),
        }
    }
}

/// A record that can be laid out along the columns `C`.
///
/// The returned row always has one cell per column, in column order.
pub trait Project<C: ColumnId> {
    fn project(&self, columns: &[C], style: TextStyle) -> Vec<String>;
}

fn user_name(user: Option<&User>) -> String {
    user.map(|u| single_line(u.label())).unwrap_or_default()
}

fn named(value: Option<&Named>) -> String {
    value.map(|n| single_line(&n.name)).unwrap_or_default()
}

impl Project<IssueColumn> for Issue {
    fn project(&self, columns: &[IssueColumn], style: TextStyle) -> Vec<String> {
        let f = &self.fields;
        columns
            .iter()
            .map(|column| match column {
                IssueColumn::Type => single_line(&f.issue_type.name),
                IssueColumn::Key => single_line(&self.key),
                IssueColumn::Summary => style.title(&f.summary),
                IssueColumn::Status => single_line(&f.status.name),
                IssueColumn::Assignee => user_name(f.assignee.as_ref()),
                IssueColumn::Reporter => user_name(f.reporter.as_ref()),
                IssueColumn::Priority => named(f.priority.as_ref()),
                IssueColumn::Resolution => named(f.resolution.as_ref()),
                IssueColumn::Created => format_date_time(&f.created, DateLayout::Jira),
                IssueColumn::Updated => format_date_time(&f.updated, DateLayout::Jira),
            })
            .collect()
    }
}

impl Project<SprintColumn> for Sprint {
    fn project(&self, columns: &[SprintColumn], style: TextStyle) -> Vec<String> {
        columns
            .iter()
            .map(|column| match column {
                SprintColumn::Id => self.id.to_string(),
                SprintColumn::Name => style.title(&self.name),
                SprintColumn::Start => format_date_time(&self.start_date, DateLayout::Rfc3339),
                SprintColumn::End => format_date_time(&self.end_date, DateLayout::Rfc3339),
                SprintColumn::Completed => {
                    format_date_time(&self.complete_date, DateLayout::Rfc3339)
                }
                SprintColumn::State => single_line(&self.status),
            })
            .collect()
    }
}

/// Builds a table of `records` along `columns`, with a header row unless `with_header` is false.
pub fn tabularize<'r, C, R>(
    records: impl IntoIterator<Item = &'r R>,
    columns: &[C],
    style: TextStyle,
    with_header: bool,
) -> TableData
where
    C: ColumnId,
    R: Project<C> + 'r,
{
    let records = records.into_iter();
    let mut data = TableData::with_capacity(records.size_hint().0 + 1);
    if with_header {
        data.push(header(columns));
    }
    data.extend(records.map(|r| r.project(columns, style)));
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::IssueFields;

    fn issue() -> Issue {
        Issue {
            id: "10001".to_string(),
            key: "TEST-1".to_string(),
            fields: IssueFields {
                summary: "A very long summary line that keeps going well past the fixed title width"
                    .to_string(),
                issue_type: Named { name: "Bug".to_string() },
                status: Named { name: "In Progress".to_string() },
                assignee: None,
                reporter: Some(User {
                    name: "jdoe".to_string(),
                    display_name: "Jane Doe".to_string(),
                    ..Default::default()
                }),
                priority: Some(Named { name: "High".to_string() }),
                resolution: None,
                created: "2020-12-13T14:05:20.974+0100".to_string(),
                updated: "not a date".to_string(),
            },
        }
    }

    #[test]
    fn row_has_one_cell_per_column() {
        let issue = issue();
        for n in 0..=IssueColumn::ALL.len() {
            let cols = &IssueColumn::ALL[..n];
            assert_eq!(issue.project(cols, TextStyle::Fixed).len(), n);
            assert_eq!(issue.project(cols, TextStyle::Plain).len(), n);
        }
    }

    #[test]
    fn projects_fields_in_column_order() {
        let row = issue().project(
            &[
                IssueColumn::Created,
                IssueColumn::Key,
                IssueColumn::Assignee,
                IssueColumn::Reporter,
                IssueColumn::Updated,
            ],
            TextStyle::Plain,
        );
        assert_eq!(
            row,
            vec!["2020-12-13 14:05:20", "TEST-1", "", "Jane Doe", "not a date"]
        );
    }

    #[test]
    fn summaries_are_cut_only_in_fixed_style() {
        let issue = issue();
        let fixed = issue.project(&[IssueColumn::Summary], TextStyle::Fixed);
        let plain = issue.project(&[IssueColumn::Summary], TextStyle::Plain);
        assert!(fixed[0].ends_with('…'));
        assert_eq!(fixed[0].chars().count(), MAX_TITLE_WIDTH);
        assert_eq!(plain[0], issue.fields.summary);
    }

    #[test]
    fn sprint_projection() {
        let sprint = Sprint {
            id: 7,
            name: "Sprint\n7".to_string(),
            status: "active".to_string(),
            start_date: "2020-12-07T16:12:00.000Z".to_string(),
            end_date: String::new(),
            ..Default::default()
        };
        let row = sprint.project(SprintColumn::ALL, TextStyle::Fixed);
        assert_eq!(
            row,
            vec!["7", "Sprint 7", "2020-12-07 16:12:00", "", "", "active"]
        );
    }

    #[test]
    fn tabularize_adds_header_on_request() {
        let issues = vec![issue(), issue()];
        let cols = [IssueColumn::Key, IssueColumn::Status];
        let data = tabularize(&issues, &cols, TextStyle::Plain, true);
        assert_eq!(data.len(), 3);
        assert_eq!(data[0], vec!["KEY", "STATUS"]);
        assert_eq!(data[2], vec!["TEST-1", "In Progress"]);

        let data = tabularize(&issues, &cols, TextStyle::Plain, false);
        assert_eq!(data.len(), 2);
    }
}
