//! CLI argument parsing for projboard

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "projboard")]
#[command(version, about = "Drag-and-drop project board rendered into an in-process page", long_about = None)]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Submit a project through the form, as `title;description;people`
    #[arg(short, long = "project", value_name = "TITLE;DESCRIPTION;PEOPLE")]
    pub projects: Vec<String>,

    /// Drag the active project with this title onto the finished list
    #[arg(short, long = "finish", value_name = "TITLE")]
    pub finish: Vec<String>,

    /// Print the store snapshot as JSON instead of the page markup
    #[arg(long)]
    pub json: bool,
}

/// Splits a `--project` value into its three raw form fields.
pub fn split_project_fields(value: &str) -> Option<[&str; 3]> {
    let mut parts = value.splitn(3, ';');
    Some([parts.next()?, parts.next()?, parts.next()?])
}
