use clap::{Args, Parser, Subcommand};

use crate::table::DisplayFormat;
use crate::view::TeamFormat;

/// Terminal views over exported Jira and Tempo API responses.
#[derive(Debug, Parser)]
#[command(name = "jira-view", version, about)]
pub struct Cli {
    /// Log at debug level.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Tab separated output without colors, truncation or pager.
    #[arg(long)]
    pub plain: bool,

    /// Omit the header row in plain output.
    #[arg(long)]
    pub no_headers: bool,

    /// Comma separated list of columns to show.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl From<DisplayArgs> for DisplayFormat {
    fn from(args: DisplayArgs) -> Self {
        DisplayFormat {
            plain: args.plain,
            no_headers: args.no_headers,
            columns: args.columns,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List issues of a search result.
    Issues {
        file: String,
        #[command(flatten)]
        display: DisplayArgs,
        #[arg(long, default_value = "")]
        project: String,
    },
    /// Explore sprints and their issues.
    Sprints {
        file: String,
        /// Issues per sprint, keyed by "<boardId>-<sprintId>".
        #[arg(long, value_name = "FILE")]
        issues: Option<String>,
        /// Print the sprints as a table instead of the explorer.
        #[arg(long)]
        table: bool,
        #[command(flatten)]
        display: DisplayArgs,
        #[arg(long, default_value = "")]
        project: String,
        #[arg(long, default_value = "")]
        board: String,
        /// Base URL issues are opened at.
        #[arg(long, default_value = "")]
        server: String,
    },
    /// List worklogs of an issue, most recent first.
    Worklogs {
        file: String,
        #[arg(long)]
        plain: bool,
        /// Tempo details keyed by Jira worklog id.
        #[arg(long, value_name = "FILE")]
        tempo: Option<String>,
    },
    /// List unreleased versions of a project.
    Versions { file: String },
    /// List Tempo teams.
    Teams {
        file: String,
        #[arg(long)]
        plain: bool,
        #[arg(long, value_enum, default_value_t = TeamFormat::Table)]
        format: TeamFormat,
    },
}
