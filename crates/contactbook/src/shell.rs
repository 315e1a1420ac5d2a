//! Interactive form session.
//!
//! Reads one command per line and drives a [`FormController`] against a
//! [`RecordStore`], printing the listing and the form after each change.
//! Positions typed by the user refer to the listing as last filtered by
//! `search`.
//!
//! [`run`] takes any source of lines. At a terminal that source is a
//! [`Prompt`], which adds line editing and a persistent history.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::form::{FormController, SubmitOutcome};
use crate::render::{write_form, write_listing};
use crate::repository::RecordRepository;
use crate::search::{SearchView, Selector};
use crate::store::RecordStore;

const PROMPT: &str = "cbook> ";

const HELP: &str = "\
Commands:
  set <field> [value]   set firstName, lastName or phone
  submit                add the draft, or update the record being edited
  edit <n|id>           load a listed record into the form
  delete <n|id>         delete a listed record
  search [text]         filter the listing by name (no text clears it)
  list                  show the listing
  show                  show the form
  help                  show this help
  quit                  leave the session";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Set { field: &'a str, value: &'a str },
    Submit,
    Edit(&'a str),
    Delete(&'a str),
    Search(&'a str),
    List,
    Show,
    Help,
    Quit,
    Blank,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        match command {
            "" => Self::Blank,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(f, v)| (f, v.trim()));
                Self::Set { field, value }
            }
            "submit" => Self::Submit,
            "edit" => Self::Edit(rest),
            "delete" => Self::Delete(rest),
            "search" => Self::Search(rest),
            "list" => Self::List,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other),
        }
    }
}

/// Terminal line source backed by `rustyline`.
///
/// Yields one line per prompt and stops at end of input or Ctrl-C.
pub struct Prompt {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl Prompt {
    /// Open the terminal editor, loading history from `history` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be set up.
    pub fn new(history: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history.as_ref().filter(|path| path.exists()) {
            if let Err(err) = editor.load_history(path) {
                debug!("Ignoring unreadable history {}: {}", path.display(), err);
            }
        }
        Ok(Self { editor, history })
    }

    /// Write the session's history back to its file.
    ///
    /// # Errors
    ///
    /// Returns an error if the history directory or file can't be written.
    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.editor.save_history(path)?;
        Ok(())
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prompt")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Iterator for Prompt {
    type Item = std::result::Result<String, ReadlineError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        return Some(Err(err));
                    }
                }
                Some(Ok(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Run an interactive session until `quit` or the lines run out.
///
/// User mistakes (blank fields, unknown fields, bad positions) are reported
/// on `out` and the session continues. Storage failures end the session.
///
/// # Errors
///
/// Returns an error if reading input, writing output, or persisting fails.
pub fn run<R, L, E, O>(
    store: &mut RecordStore<R>,
    lines: L,
    out: &mut O,
    show_ids: bool,
) -> Result<()>
where
    R: RecordRepository,
    L: IntoIterator<Item = std::result::Result<String, E>>,
    Error: From<E>,
    O: Write,
{
    let mut form = FormController::new();
    let mut query = String::new();

    list(out, store, "", show_ids)?;
    write_form(out, &form)?;
    out.flush()?;

    for line in lines {
        let line = line?;
        let parsed = Input::parse(&line);
        debug!("Shell input: {:?}", parsed);

        let result = match parsed {
            Input::Quit => break,
            Input::Blank => Ok(()),
            Input::Help => writeln!(out, "{HELP}").map_err(<Error as From<std::io::Error>>::from),
            Input::Set { field, value } => form
                .set_field_named(field, value)
                .and_then(|()| write_form(out, &form)),
            Input::Submit => submit(store, &mut form, out, &query, show_ids),
            Input::Edit(target) => target.parse::<Selector>().and_then(|selector| {
                let id = SearchView::new(store.records(), query.as_str()).select(selector)?;
                form.begin_edit(store, id)?;
                write_form(out, &form)
            }),
            Input::Delete(target) => target.parse::<Selector>().and_then(|selector| {
                let id = SearchView::new(store.records(), query.as_str()).select(selector)?;
                let removed = form.delete(store, id)?;
                writeln!(out, "Deleted {removed}")?;
                list(out, store, &query, show_ids)
            }),
            Input::Search(text) => {
                query = text.to_string();
                list(out, store, &query, show_ids)
            }
            Input::List => list(out, store, &query, show_ids),
            Input::Show => write_form(out, &form),
            Input::Unknown(command) => {
                writeln!(out, "Unknown command '{command}', type 'help' for a list")
                    .map_err(<Error as From<std::io::Error>>::from)
            }
        };

        match result {
            Ok(()) => {}
            Err(err) if is_user_error(&err) => writeln!(out, "{}", user_message(&err))?,
            Err(err) => return Err(err),
        }
        out.flush()?;
    }

    Ok(())
}

fn submit<R: RecordRepository, O: Write>(
    store: &mut RecordStore<R>,
    form: &mut FormController,
    out: &mut O,
    query: &str,
    show_ids: bool,
) -> Result<()> {
    match form.submit(store)? {
        SubmitOutcome::Added(id) => writeln!(out, "Added record {id}")?,
        SubmitOutcome::Updated(id) => writeln!(out, "Updated record {id}")?,
    }
    list(out, store, query, show_ids)?;
    write_form(out, form)
}

fn list<R: RecordRepository, O: Write>(
    out: &mut O,
    store: &RecordStore<R>,
    query: &str,
    show_ids: bool,
) -> Result<()> {
    let view = SearchView::new(store.records(), query);
    write_listing(out, &view, OutputFormat::Plain, show_ids)
}

fn is_user_error(err: &Error) -> bool {
    err.is_incomplete_form() || err.is_selection_error() || matches!(err, Error::UnknownField(_))
}

fn user_message(err: &Error) -> String {
    if err.is_incomplete_form() {
        "Please fill all fields before submitting.".to_string()
    } else {
        format!("error: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufRead};

    use crate::logging::init_test_logging;
    use crate::record::Record;
    use crate::repository::SlotRepository;
    use crate::storage::MemoryStore;

    type TestStore = RecordStore<SlotRepository<MemoryStore>>;

    fn store_with(records: &[Record]) -> TestStore {
        let mut repo = SlotRepository::with_default_key(MemoryStore::new());
        repo.save_all(records).unwrap();
        RecordStore::load(repo).unwrap()
    }

    fn session(store: &mut TestStore, script: &str) -> String {
        init_test_logging();
        let mut out = Vec::new();
        run(store, script.as_bytes().lines(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(
            Input::parse("set firstName  Mary Ann "),
            Input::Set {
                field: "firstName",
                value: "Mary Ann"
            }
        );
        assert_eq!(
            Input::parse("set phone"),
            Input::Set {
                field: "phone",
                value: ""
            }
        );
        assert_eq!(Input::parse("  "), Input::Blank);
        assert_eq!(Input::parse("search"), Input::Search(""));
        assert_eq!(Input::parse("edit 2"), Input::Edit("2"));
        assert_eq!(Input::parse("exit"), Input::Quit);
        assert_eq!(Input::parse("frobnicate"), Input::Unknown("frobnicate"));
    }

    #[test]
    fn test_add_through_shell() {
        let mut store = store_with(&[Record::new("Ann", "Lee", "555")]);
        let output = session(
            &mut store,
            "set firstName Bo\nset lastName Ng\nset phone 000\nsubmit\nquit\n",
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].first_name, "Bo");
        assert!(output.contains("Added record"));
        assert!(output.contains("2. Bo Ng - 000"));
    }

    #[test]
    fn test_incomplete_submit_warns_and_keeps_draft() {
        let mut store = store_with(&[]);
        let output = session(&mut store, "set firstName Bo\nset lastName Ng\nsubmit\nshow\n");

        assert!(store.is_empty());
        assert!(output.contains("Please fill all fields before submitting."));
        assert!(output.ends_with("[Add User Data]\n"));
        assert!(output.contains("First name: Bo"));
    }

    #[test]
    fn test_edit_through_filtered_listing() {
        let mut store = store_with(&[
            Record::new("Ann", "Lee", "555"),
            Record::new("Bo", "Ng", "000"),
        ]);
        let output = session(
            &mut store,
            "search bo\nedit 1\nset phone 999\nsubmit\n",
        );

        assert!(output.contains("[Update User Data]"));
        assert_eq!(store.records()[0].phone, "555");
        assert_eq!(store.records()[1].phone, "999");
    }

    #[test]
    fn test_delete_through_filtered_listing() {
        let mut store = store_with(&[
            Record::new("Ann", "Lee", "555"),
            Record::new("Bo", "Ng", "000"),
        ]);
        let output = session(&mut store, "search ng\ndelete 1\n");

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].first_name, "Ann");
        assert!(output.contains("Deleted Bo Ng - 000"));
        assert!(output.contains("No user data available."));
    }

    #[test]
    fn test_user_errors_do_not_end_session() {
        let mut store = store_with(&[Record::new("Ann", "Lee", "555")]);
        let output = session(
            &mut store,
            "edit 5\nset email x\nedit nobody\nbogus\ndelete 1\n",
        );

        assert!(output.contains("position 5 is out of range"));
        assert!(output.contains("unknown field 'email'"));
        assert!(output.contains("invalid record selector 'nobody'"));
        assert!(output.contains("Unknown command 'bogus'"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_read_failure_ends_session() {
        let mut store = store_with(&[]);
        let lines = vec![
            Ok("set firstName Bo".to_string()),
            Err(io::Error::other("terminal went away")),
            Ok("set lastName Ng".to_string()),
        ];
        let mut out = Vec::new();

        let err = run(&mut store, lines, &mut out, false).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!String::from_utf8(out).unwrap().contains("Last name: Ng"));
    }

    #[test]
    fn test_session_accepts_editor_lines() {
        let mut store = store_with(&[]);
        let lines: Vec<std::result::Result<String, ReadlineError>> = vec![
            Ok("set firstName Bo".to_string()),
            Ok("set lastName Ng".to_string()),
            Ok("set phone 000".to_string()),
            Ok("submit".to_string()),
        ];
        let mut out = Vec::new();

        run(&mut store, lines, &mut out, false).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_store_shows_placeholder() {
        let mut store = store_with(&[]);
        let output = session(&mut store, "");
        assert!(output.starts_with("No user data available."));
    }

    #[test]
    fn test_corrupt_backend_is_fatal_on_load() {
        let repo = SlotRepository::with_default_key(MemoryStore::with_slot("users", "]["));
        assert!(RecordStore::load(repo).is_err());
    }
}
