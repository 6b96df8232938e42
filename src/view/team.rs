use std::io::{self, Write};

use clap::ValueEnum;

use crate::domain::ViewError;
use crate::pager::page_out;
use crate::table::{TableData, tab_align};
use crate::tempo::Team;
use crate::view::render_or_notice;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TeamFormat {
    #[default]
    Table,
    Json,
}

const NO_TEAMS: &str = "No teams found";

/// Prints teams in the requested format. JSON wins over `plain`.
///
/// No teams is a failure for the table, and only a notice for JSON and plain output.
pub fn display_teams(teams: &[Team], plain: bool, format: TeamFormat) -> Result<(), ViewError> {
    render_or_notice(&mut io::stderr(), teams_notice(teams, plain, format), || {
        if format == TeamFormat::Json {
            return write_json(&mut io::stdout().lock(), teams);
        }
        if plain {
            return write_plain(&mut io::stdout().lock(), teams);
        }
        page_out(&team_table(teams)?)
    })
}

fn is_table(plain: bool, format: TeamFormat) -> bool {
    format == TeamFormat::Table && !plain
}

pub fn teams_notice(teams: &[Team], plain: bool, format: TeamFormat) -> Option<String> {
    (teams.is_empty() && !is_table(plain, format)).then(|| NO_TEAMS.to_string())
}

pub fn write_json<W: Write>(w: &mut W, teams: &[Team]) -> Result<(), ViewError> {
    serde_json::to_writer_pretty(&mut *w, teams)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_plain<W: Write>(w: &mut W, teams: &[Team]) -> Result<(), ViewError> {
    for t in teams {
        writeln!(w, "ID: {}, Name: {}, Summary: {}", t.id, t.name, t.summary)?;
    }
    w.flush()?;
    Ok(())
}

pub fn team_table(teams: &[Team]) -> Result<String, ViewError> {
    if teams.is_empty() {
        return Err(ViewError::LoadingFailed(NO_TEAMS.to_string()));
    }
    let mut data: TableData = vec![
        ["ID", "NAME", "SUMMARY", "LEAD", "MEMBERS"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    ];
    data.extend(teams.iter().map(|t| {
        vec![
            t.id.to_string(),
            t.name.clone(),
            t.summary.clone(),
            t.lead.as_ref().map(|l| l.display_name.clone()).unwrap_or_default(),
            t.members.len().to_string(),
        ]
    }));
    Ok(tab_align(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo::{Member, TempoUser};

    fn teams() -> Vec<Team> {
        vec![Team {
            id: 3,
            name: "Platform".to_string(),
            summary: "Infra".to_string(),
            lead: Some(TempoUser {
                display_name: "Ada".to_string(),
                ..Default::default()
            }),
            members: vec![Member::default(), Member::default()],
            ..Default::default()
        }]
    }

    #[test]
    fn plain_lines() {
        let mut buf = Vec::new();
        write_plain(&mut buf, &teams()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ID: 3, Name: Platform, Summary: Infra\n"
        );
    }

    #[test]
    fn json_is_pretty_printed() {
        let mut buf = Vec::new();
        write_json(&mut buf, &teams()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\n  {\n    \"id\": 3,"));
        let back: Vec<Team> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, teams());
    }

    #[test]
    fn table_lists_lead_and_member_count() {
        let out = team_table(&teams()).unwrap();
        let row: Vec<&str> = out.lines().nth(1).unwrap().split('\t').filter(|c| !c.is_empty()).collect();
        assert_eq!(row, vec!["3", "Platform", "Infra", "Ada", "2"]);
    }

    #[test]
    fn no_teams_is_an_error() {
        assert!(matches!(team_table(&[]), Err(ViewError::LoadingFailed(m)) if m == "No teams found"));
    }

    #[test]
    fn no_teams_fail_only_the_table() {
        assert!(matches!(
            display_teams(&[], false, TeamFormat::Table),
            Err(ViewError::LoadingFailed(m)) if m == "No teams found"
        ));
        assert_eq!(teams_notice(&[], false, TeamFormat::Table), None);
        assert_eq!(teams_notice(&teams(), true, TeamFormat::Json), None);

        for (plain, format) in [(true, TeamFormat::Table), (false, TeamFormat::Json)] {
            let (mut out, mut err): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
            render_or_notice(&mut err, teams_notice(&[], plain, format), || {
                write_plain(&mut out, &[])
            })
            .unwrap();
            assert!(out.is_empty());
            assert_eq!(String::from_utf8(err).unwrap().matches("No teams found").count(), 1);
        }
    }
}
