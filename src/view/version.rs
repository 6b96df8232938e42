use crate::domain::ViewError;
use crate::format::{prepare_title, single_line};
use crate::jira::Version;
use crate::pager::page_out;
use crate::table::{TableData, tab_align};

const HEADER: [&str; 5] = ["ID", "START", "RELEASE", "NAME", "DESC"];

/// Unreleased versions of a project.
pub struct VersionView<'v> {
    unreleased: Vec<&'v Version>,
}

impl<'v> VersionView<'v> {
    pub fn new(data: &'v [Version]) -> Self {
        Self {
            unreleased: data.iter().filter(|v| !v.released).collect(),
        }
    }

    /// Set when every version is released, or there are none.
    pub fn empty_notice(&self) -> Option<String> {
        self.unreleased
            .is_empty()
            .then(|| "No versions found".to_string())
    }

    pub fn render(&self) -> Result<(), ViewError> {
        page_out(&self.layout())
    }

    pub fn layout(&self) -> String {
        let mut data: TableData = vec![HEADER.iter().map(|h| h.to_string()).collect()];
        data.extend(self.unreleased.iter().map(|v| {
            vec![
                single_line(&v.id),
                single_line(&v.user_start_date),
                single_line(&v.user_release_date),
                prepare_title(&v.name),
                single_line(&v.description),
            ]
        }));
        tab_align(&data)
    }
}
