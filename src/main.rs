use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use is_terminal::IsTerminal;
use tracing::{debug, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, fmt::writer::BoxMakeWriter, prelude::*};

mod cli;
mod columns;
mod controller;
mod domain;
mod format;
mod input;
mod jira;
mod model;
mod pager;
mod project;
mod table;
mod tempo;
mod ui;
mod view;

use cli::{Cli, Command};
use domain::{TVConfig, ViewError};
use input::{load_json, load_list};
use jira::{Issue, Sprint, Version, Worklog};
use tempo::{Team, TempoDetails, WorklogWithTempo, enrich_worklogs, lookup_in};
use view::{IssueList, SprintList, VersionView, WorklogView, display_teams, render_or_notice};

const LOG_ENV: &str = "JIRA_VIEW_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(debug: bool, log_file: Option<&str>) -> Result<(), ViewError> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let writer = match log_file {
        Some(path) => {
            let path = shellexpand::full(path)
                .map_err(|e| ViewError::LoadingFailed(e.to_string()))?;
            BoxMakeWriter::new(Mutex::new(File::create(&*path)?))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(log_file.is_none()))
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), ViewError> {
    match cli.command {
        Command::Issues {
            file,
            display,
            project,
        } => {
            let list = IssueList {
                project,
                data: load_list(&file)?,
                display: display.into(),
            };
            render_or_notice(&mut io::stderr(), list.empty_notice(), || list.render())
        }
        Command::Sprints {
            file,
            issues,
            table,
            display,
            project,
            board,
            server,
        } => {
            let data: Vec<Sprint> = load_list(&file)?;
            let by_sprint: HashMap<String, Vec<Issue>> = match issues {
                Some(path) => load_json(&path)?,
                None => HashMap::new(),
            };
            let list = SprintList {
                project,
                board,
                server,
                data,
                issues: Box::new(move |bid: u64, sid: u64| {
                    let key = format!("{bid}-{sid}");
                    by_sprint.get(&key).cloned().unwrap_or_else(|| {
                        warn!("No issues exported for sprint {key}");
                        Vec::new()
                    })
                }),
                display: display.into(),
            };
            render_or_notice(&mut io::stderr(), list.empty_notice(), || {
                if table || list.display.plain {
                    list.render_in_table()
                } else {
                    list.render(&TVConfig::default())
                }
            })
        }
        Command::Worklogs { file, plain, tempo } => {
            let data: Vec<Worklog> = load_list(&file)?;
            let worklogs: Vec<WorklogWithTempo> = match tempo {
                Some(path) => {
                    let details: TempoDetails = load_json(&path)?;
                    debug!("Loaded Tempo details of {} worklogs", details.len());
                    enrich_worklogs(data, |id| lookup_in(&details, id))
                }
                None => data.into_iter().map(WorklogWithTempo::from).collect(),
            };
            let stdout = io::stdout();
            let view = WorklogView::new(&worklogs, stdout.is_terminal());
            render_or_notice(&mut io::stderr(), view.empty_notice(), || {
                view.render(&mut stdout.lock(), plain)
            })
        }
        Command::Versions { file } => {
            let data: Vec<Version> = load_list(&file)?;
            let view = VersionView::new(&data);
            render_or_notice(&mut io::stderr(), view.empty_notice(), || view.render())
        }
        Command::Teams {
            file,
            plain,
            format,
        } => {
            let data: Vec<Team> = load_list(&file)?;
            display_teams(&data, plain, format)
        }
    }
}
