use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectSortArg {
    Modified,
    Name,
    Sessions,
}

impl fmt::Display for ProjectSortArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectSortArg::Modified => write!(f, "modified"),
            ProjectSortArg::Name => write!(f, "name"),
            ProjectSortArg::Sessions => write!(f, "sessions"),
        }
    }
}

impl From<ProjectSortArg> for cclog_providers::ProjectSort {
    fn from(sort: ProjectSortArg) -> Self {
        match sort {
            ProjectSortArg::Modified => cclog_providers::ProjectSort::LastModified,
            ProjectSortArg::Name => cclog_providers::ProjectSort::Name,
            ProjectSortArg::Sessions => cclog_providers::ProjectSort::SessionCount,
        }
    }
}
