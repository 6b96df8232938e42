//! Decoded records of the work-tracking API.
//!
//! Only the fields the views render are modelled. Missing nested objects
//! (an unassigned issue, an unresolved one) decode to their default value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub name: String,
    pub display_name: String,
    pub email_address: String,
    pub active: bool,
}

impl User {
    /// Display name with a fallback to the login name.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Any `{ "name": ... }` object (issue type, status, priority, resolution).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueFields {
    pub summary: String,
    #[serde(rename = "issuetype")]
    pub issue_type: Named,
    pub status: Named,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub priority: Option<Named>,
    pub resolution: Option<Named>,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(rename = "state")]
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub complete_date: String,
    #[serde(rename = "originBoardId")]
    pub board_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Worklog {
    #[serde(rename = "self")]
    pub self_link: String,
    pub author: User,
    pub update_author: User,
    pub comment: String,
    pub created: String,
    pub updated: String,
    pub started: String,
    pub time_spent: String,
    pub time_spent_seconds: i64,
    pub id: String,
    pub issue_id: String,
}

impl Worklog {
    pub fn is_updated(&self) -> bool {
        self.updated != self.created
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub name: String,
    pub description: String,
    pub released: bool,
    pub archived: bool,
    pub user_start_date: String,
    pub user_release_date: String,
}
