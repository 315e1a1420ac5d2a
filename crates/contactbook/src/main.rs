//! `cbook` - CLI for contactbook
//!
//! This binary provides the command-line interface for adding, editing,
//! searching and deleting contact records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use contactbook::cli::{
    Cli, Command, ConfigCommand, DeleteCommand, EditCommand, FieldArgs, ListCommand,
};
use contactbook::render::write_listing;
use contactbook::{
    init_logging, shell, Config, FormController, SearchView, Selector, SqliteRecordStore,
    SubmitOutcome,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    debug!("Using database {}", config.database_path().display());

    match cli.command {
        Command::Add(add) => handle_add(&config, &add.fields),
        Command::Edit(edit) => handle_edit(&config, &edit),
        Command::Delete(delete) => handle_delete(&config, &delete),
        Command::List(list) => handle_list(&config, &list),
        Command::Shell => handle_shell(&config),
        Command::Status(status) => handle_status(&config, status.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn fill_form(form: &mut FormController, fields: &FieldArgs) {
    for (field, value) in fields.provided() {
        form.set_field(field, value);
    }
}

fn handle_add(config: &Config, fields: &FieldArgs) -> anyhow::Result<()> {
    let mut store = SqliteRecordStore::open(config)?;
    let mut form = FormController::new();
    fill_form(&mut form, fields);

    let outcome = form.submit(&mut store)?;
    let record = store
        .get(outcome.id())
        .context("added record missing from store")?;
    println!("Added {record} [{}]", record.id);
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    if cmd.fields.provided().is_empty() {
        bail!("nothing to change: pass --first-name, --last-name or --phone");
    }

    let mut store = SqliteRecordStore::open(config)?;
    let selector: Selector = cmd.target.parse()?;
    let id = SearchView::new(store.records(), cmd.search.as_deref().unwrap_or(""))
        .select(selector)?;

    let mut form = FormController::new();
    form.begin_edit(&store, id)?;
    fill_form(&mut form, &cmd.fields);

    if let SubmitOutcome::Updated(id) = form.submit(&mut store)? {
        if let Some(record) = store.get(id) {
            println!("Updated {record} [{id}]");
        }
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut store = SqliteRecordStore::open(config)?;
    let selector: Selector = cmd.target.parse()?;
    let id = SearchView::new(store.records(), cmd.search.as_deref().unwrap_or(""))
        .select(selector)?;

    let removed = FormController::new().delete(&mut store, id)?;
    println!("Deleted {removed} [{id}]");
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = SqliteRecordStore::open(config)?;
    let view = SearchView::new(store.records(), cmd.search.clone().unwrap_or_default());
    let format = cmd.format.unwrap_or(config.display.format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &view, format, config.display.show_ids)?;
    out.flush()?;
    Ok(())
}

fn handle_shell(config: &Config) -> anyhow::Result<()> {
    let mut store = SqliteRecordStore::open(config)?;
    let mut prompt = shell::Prompt::new(Some(Config::default_data_dir().join("shell_history")))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    shell::run(&mut store, &mut prompt, &mut out, config.display.show_ids)?;
    prompt.save_history()?;
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = SqliteRecordStore::open(config)?;
    let info = store.repository().slot_info()?;
    let database_path = config.database_path();

    if json {
        let status = serde_json::json!({
            "database_path": database_path,
            "slot_key": config.slot_key(),
            "records": store.len(),
            "slot_bytes": info.as_ref().map(|i| i.size_bytes),
            "last_write": info.as_ref().map(|i| i.updated_at.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("cbook status");
        println!("------------");
        println!("Database:      {}", database_path.display());
        println!("Slot:          {}", config.slot_key());
        println!("Records:       {}", store.len());
        match info {
            Some(info) => {
                println!("Slot size:     {} bytes", info.size_bytes);
                println!("Last write:    {}", info.updated_at.to_rfc3339());
            }
            None => println!("Last write:    never"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.slot_key());
                println!();
                println!("[Display]");
                println!("  Format:             {:?}", config.display.format);
                println!("  Show ids:           {}", config.display.show_ids);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
