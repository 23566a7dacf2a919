//! projboard entry point.
//!
//! Wires the board into a standard in-process page, replays the requested
//! form submissions and drags, then prints the result.

mod cli;
mod replay;

use clap::Parser;
use eyre::{bail, Result, WrapErr};
use log::info;
use projboard_core::{
    default_log_level, init_logging, logging_status, standard_document, BoardConfig,
    HostDocument, ProjectBoard,
};

use crate::cli::{split_project_fields, Cli};
use crate::replay::{finish, submit};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BoardConfig::load(path).wrap_err("Failed to load configuration")?,
        None => BoardConfig::default(),
    };

    if let Some(log_dir) = cli.log_dir.as_deref().or(config.log_dir.as_deref()) {
        let level = cli
            .log_level
            .as_deref()
            .or(config.log_level.as_deref())
            .unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).wrap_err("Failed to setup logging")?;
    }

    let layout = &config.layout;
    let document = standard_document(layout);
    let board = ProjectBoard::mount(document.clone(), layout).wrap_err("Failed to mount board")?;
    match logging_status() {
        Some((level, dir)) => info!(
            "projboard {} started log_level={level} log_dir={}",
            projboard_core::core_version(),
            dir.display()
        ),
        None => info!("projboard {} started", projboard_core::core_version()),
    }

    for raw in &cli.projects {
        let Some(values) = split_project_fields(raw) else {
            bail!("--project expects `title;description;people`, got `{raw}`");
        };
        if let Some(message) = submit(&document, &board, values) {
            eprintln!("rejected `{raw}`: {message}");
        }
    }

    for title in &cli.finish {
        if finish(&document, &board, title).is_none() {
            eprintln!("no active project titled `{title}`");
        }
    }

    if cli.json {
        let snapshot = serde_json::to_string_pretty(&board.store().projects())?;
        println!("{snapshot}");
    } else if let Some(host) = document.element_by_id(&layout.input_host_id) {
        println!("{}", document.outer_html(host));
        if layout.list_host_id != layout.input_host_id {
            if let Some(lists) = document.element_by_id(&layout.list_host_id) {
                println!("{}", document.outer_html(lists));
            }
        }
    }

    Ok(())
}
