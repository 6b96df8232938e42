//! Records of the Tempo time-tracking plugin and the worklog enrichment built on them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ViewError;
use crate::jira::{Issue, User, Worklog};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TempoUser {
    pub account_id: String,
    pub display_name: String,
    pub email_address: String,
    pub username: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Member {
    pub user: Option<TempoUser>,
    pub role: String,
    pub commitment: i64,
    pub from: String,
    pub to: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub lead_id: String,
    pub lead: Option<TempoUser>,
    pub members: Vec<Member>,
    pub created_at: String,
    pub updated_at: String,
}

/// A custom worklog attribute configured in Tempo.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TempoAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TempoWorklogAttributes {
    #[serde(rename = "self")]
    pub self_link: String,
    pub values: Vec<TempoAttribute>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TempoWorklog {
    #[serde(rename = "self")]
    pub self_link: String,
    pub tempo_worklog_id: u64,
    pub jira_worklog_id: u64,
    pub issue: Issue,
    pub time_spent_seconds: i64,
    pub billable_seconds: i64,
    pub start_date: String,
    pub start_time: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: User,
    pub attributes: TempoWorklogAttributes,
}

/// A worklog together with whatever Tempo knows about it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogWithTempo {
    #[serde(flatten)]
    pub worklog: Worklog,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tempo_attributes: Vec<TempoAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_seconds: Option<i64>,
}

/// Tempo details keyed by Jira worklog id, as exported from the Tempo API.
pub type TempoDetails = HashMap<String, TempoWorklog>;

/// Looks up the Tempo details of a worklog in an exported set.
pub fn lookup_in(details: &TempoDetails, worklog_id: &str) -> Result<TempoWorklog, ViewError> {
    details.get(worklog_id).cloned().ok_or_else(|| {
        ViewError::LoadingFailed(format!("no tempo details for worklog {worklog_id}"))
    })
}

/// Wraps every worklog with its Tempo details.
///
/// A failed lookup keeps the plain worklog: the listing has to work on
/// instances without Tempo.
pub fn enrich_worklogs<F>(worklogs: Vec<Worklog>, lookup: F) -> Vec<WorklogWithTempo>
where
    F: Fn(&str) -> Result<TempoWorklog, ViewError>,
{
    worklogs
        .into_iter()
        .map(|worklog| match lookup(&worklog.id) {
            Ok(tempo) => WorklogWithTempo {
                worklog,
                tempo_attributes: tempo.attributes.values,
                billable_seconds: Some(tempo.billable_seconds),
            },
            Err(e) => {
                debug!("Tempo details unavailable for worklog {}: {e}", worklog.id);
                WorklogWithTempo {
                    worklog,
                    ..Default::default()
                }
            }
        })
        .collect()
}
