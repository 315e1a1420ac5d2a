//! Text and JSON rendering of listings and the form.

use std::io::Write;

use comfy_table::{presets::UTF8_FULL, Table};

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::form::FormController;
use crate::record::Field;
use crate::search::SearchView;

/// Shown instead of a listing when nothing matches.
pub const EMPTY_LISTING: &str = "No user data available.";

/// Write a listing in the requested format.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON serialization fails.
pub fn write_listing<W: Write>(
    out: &mut W,
    view: &SearchView<'_>,
    format: OutputFormat,
    show_ids: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = view.entries().collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        _ if view.is_empty() => writeln!(out, "{EMPTY_LISTING}")?,
        OutputFormat::Plain => write_plain(out, view, show_ids)?,
        OutputFormat::Table => write_table(out, view, show_ids)?,
    }
    Ok(())
}

fn write_plain<W: Write>(out: &mut W, view: &SearchView<'_>, show_ids: bool) -> Result<()> {
    for entry in view.entries() {
        if show_ids {
            writeln!(out, "{}. {} [{}]", entry.position, entry.record, entry.record.id)?;
        } else {
            writeln!(out, "{}. {}", entry.position, entry.record)?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, view: &SearchView<'_>, show_ids: bool) -> Result<()> {
    let mut header = vec!["#"];
    header.extend(Field::ALL.iter().map(Field::label));
    if show_ids {
        header.push("Id");
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);

    for entry in view.entries() {
        let record = entry.record;
        let mut row = vec![
            entry.position.to_string(),
            record.first_name.clone(),
            record.last_name.clone(),
            record.phone.clone(),
        ];
        if show_ids {
            row.push(record.id.to_string());
        }
        table.add_row(row);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// Write the form: its mode, current values and submit label.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_form<W: Write>(out: &mut W, form: &FormController) -> Result<()> {
    writeln!(out, "Contact Form ({})", form.mode())?;
    for field in Field::ALL {
        writeln!(out, "  {:<10} {}", format!("{}:", field.label()), form.draft().get(field))?;
    }
    writeln!(out, "  [{}]", form.mode().submit_label())?;
    Ok(())
}
