//! Closed column sets per entity kind and the resolution of user-chosen columns.

use std::fmt;

use tracing::trace;

/// A column of a closed, per-entity column set.
pub trait ColumnId: Copy + PartialEq + fmt::Debug + 'static {
    /// Every column, in canonical order. This is also the default selection.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueColumn {
    Type,
    Key,
    Summary,
    Status,
    Assignee,
    Reporter,
    Priority,
    Resolution,
    Created,
    Updated,
}

impl ColumnId for IssueColumn {
    const ALL: &'static [Self] = &[
        IssueColumn::Type,
        IssueColumn::Key,
        IssueColumn::Summary,
        IssueColumn::Status,
        IssueColumn::Assignee,
        IssueColumn::Reporter,
        IssueColumn::Priority,
        IssueColumn::Resolution,
        IssueColumn::Created,
        IssueColumn::Updated,
    ];

    fn as_str(self) -> &'static str {
        match self {
            IssueColumn::Type => "TYPE",
            IssueColumn::Key => "KEY",
            IssueColumn::Summary => "SUMMARY",
            IssueColumn::Status => "STATUS",
            IssueColumn::Assignee => "ASSIGNEE",
            IssueColumn::Reporter => "REPORTER",
            IssueColumn::Priority => "PRIORITY",
            IssueColumn::Resolution => "RESOLUTION",
            IssueColumn::Created => "CREATED",
            IssueColumn::Updated => "UPDATED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprintColumn {
    Id,
    Name,
    Start,
    End,
    Completed,
    State,
}

impl ColumnId for SprintColumn {
    const ALL: &'static [Self] = &[
        SprintColumn::Id,
        SprintColumn::Name,
        SprintColumn::Start,
        SprintColumn::End,
        SprintColumn::Completed,
        SprintColumn::State,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SprintColumn::Id => "ID",
            SprintColumn::Name => "NAME",
            SprintColumn::Start => "START",
            SprintColumn::End => "END",
            SprintColumn::Completed => "COMPLETED",
            SprintColumn::State => "STATE",
        }
    }
}

/// Resolves the requested column names against the closed set `C`.
///
/// Unknown names are dropped, the requested order is kept and a repeated
/// column only counts once. An empty outcome yields `defaults`.
pub fn resolve<C: ColumnId, S: AsRef<str>>(requested: &[S], defaults: &[C]) -> Vec<C> {
    let mut out: Vec<C> = Vec::with_capacity(requested.len());
    for name in requested {
        match C::parse(name.as_ref()) {
            Some(c) if !out.contains(&c) => out.push(c),
            Some(_) => {}
            None => trace!("Dropping unknown column {:?}", name.as_ref()),
        }
    }
    if out.is_empty() {
        return defaults.to_vec();
    }
    out
}

/// Header labels for the given columns.
pub fn header<C: ColumnId>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|c| c.as_str().to_string()).collect()
}
