//! Loading of exported API responses from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ViewError;

/// A list of records, either bare or wrapped the way the list endpoints return them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Collection<T> {
    Issues { issues: Vec<T> },
    Values { values: Vec<T> },
    Worklogs { worklogs: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Collection<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Collection::Issues { issues } => issues,
            Collection::Values { values } => values,
            Collection::Worklogs { worklogs } => worklogs,
            Collection::Bare(records) => records,
        }
    }
}

fn expand(path: &str) -> Result<PathBuf, ViewError> {
    shellexpand::full(path)
        .map(|p| PathBuf::from(p.into_owned()))
        .map_err(|e| ViewError::LoadingFailed(e.to_string()))
}

fn read_file(path: &str) -> Result<String, ViewError> {
    let path = expand(path)?;
    let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ViewError::FileNotFound,
        ErrorKind::PermissionDenied => ViewError::PermissionDenied,
        _ => ViewError::Io(e),
    })?;
    if !metadata.is_file() {
        return Err(ViewError::LoadingFailed(format!(
            "{} is not a file",
            path.display()
        )));
    }
    debug!("Reading {} ({} bytes)", path.display(), metadata.len());
    Ok(fs::read_to_string(&path)?)
}

/// Decodes the JSON document at `path`.
pub fn load_json<T: DeserializeOwned>(path: &str) -> Result<T, ViewError> {
    let raw = read_file(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Decodes a list of records, bare or wrapped.
pub fn load_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ViewError> {
    load_json::<Collection<T>>(path).map(Collection::into_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::{Issue, Sprint, Version, Worklog};
    use crate::tempo::{Team, TempoDetails};
    use std::collections::HashMap;

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn wrapped_and_bare_lists_decode() {
        let issues: Vec<Issue> = load_list(&fixture("issues.json")).unwrap();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].key, "TEST-1");
        assert_eq!(issues[0].fields.issue_type.name, "Bug");
        assert!(issues[2].fields.assignee.is_none());

        let sprints: Vec<Sprint> = load_list(&fixture("sprints.json")).unwrap();
        assert_eq!(sprints[0].board_id, 5);
        assert_eq!(sprints[0].status, "closed");

        let worklogs: Vec<Worklog> = load_list(&fixture("worklogs.json")).unwrap();
        assert_eq!(worklogs[0].author.label(), "Alice Doe");
        assert!(worklogs[0].is_updated());

        let versions: Vec<Version> = load_list(&fixture("versions.json")).unwrap();
        assert_eq!(versions.iter().filter(|v| !v.released).count(), 1);

        let teams: Vec<Team> = load_list(&fixture("teams.json")).unwrap();
        assert_eq!(teams[0].name, "Platform");
    }

    #[test]
    fn keyed_documents_decode() {
        let by_sprint: HashMap<String, Vec<Issue>> =
            load_json(&fixture("sprint_issues.json")).unwrap();
        assert_eq!(by_sprint["5-1"].len(), 2);

        let tempo: TempoDetails = load_json(&fixture("tempo.json")).unwrap();
        assert_eq!(tempo["100"].billable_seconds, 1800);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            load_list::<Issue>(&fixture("missing.json")),
            Err(ViewError::FileNotFound)
        ));
    }

    #[test]
    fn directories_are_rejected() {
        assert!(matches!(
            load_list::<Issue>(&fixture("")),
            Err(ViewError::LoadingFailed(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            load_list::<Issue>(&fixture("malformed.json")),
            Err(ViewError::Json(_))
        ));
    }
}
