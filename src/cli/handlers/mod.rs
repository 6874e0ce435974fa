use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::lock::StoreLock;
use crate::io::storage::FileStore;
use crate::io::store::{Confirmation, ToDoStore};
use crate::model::item::{ItemId, Mode, ToDoItem};
use crate::ops::search;
use regex::Regex;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the store in `data_dir`.
pub fn dispatch(command: Commands, json: bool, data_dir: &Path) -> CmdResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(data_dir, args, json),
        Commands::Mode(ModeArgs { mode: None }) => cmd_show_mode(data_dir, json),

        // Write commands
        Commands::Mode(ModeArgs { mode: Some(mode) }) => cmd_set_mode(data_dir, mode, json),
        Commands::Work => cmd_set_mode(data_dir, Mode::Work, json),
        Commands::Travel => cmd_set_mode(data_dir, Mode::Travel, json),
        Commands::Add(args) => cmd_add(data_dir, args, json),
        Commands::Toggle(args) => cmd_toggle(data_dir, args, json),
        Commands::Edit(args) => cmd_edit(data_dir, args, json),
        Commands::Delete(args) => cmd_delete(data_dir, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open the store in `data_dir` (creating the directory on first use).
pub fn open_store(data_dir: &Path) -> Result<ToDoStore<FileStore>, Box<dyn std::error::Error>> {
    let storage = FileStore::open(data_dir)?;
    Ok(ToDoStore::open(storage)?)
}

/// Open the store while holding the write lock.
fn open_store_locked(
    data_dir: &Path,
) -> Result<(StoreLock, ToDoStore<FileStore>), Box<dyn std::error::Error>> {
    let storage = FileStore::open(data_dir)?;
    let lock = StoreLock::acquire_default(storage.dir())?;
    let store = ToDoStore::open(storage)?;
    Ok((lock, store))
}

fn parse_id(raw: &str) -> Result<ItemId, String> {
    raw.parse()
        .map_err(|_| format!("invalid item id '{}'", raw))
}

fn not_found(id: ItemId) -> Box<dyn std::error::Error> {
    format!("no item with id {}", id).into()
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask the delete question on `output` and read the answer from `input`.
/// Anything but y/yes/ok cancels, as does failing to show the question or
/// read the answer.
pub fn prompt_delete<R: BufRead, W: Write>(item: &ToDoItem, input: &mut R, output: &mut W) -> Confirmation {
    let shown = write!(output, "Delete To Do\n  {}\nR U sure? [y/N] ", item.text)
        .and_then(|()| output.flush());
    if let Err(e) = shown {
        tracing::warn!("could not show delete prompt: {e}");
        return Confirmation::Cancel;
    }
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return Confirmation::Cancel;
    }
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "ok" => Confirmation::Ok,
        _ => Confirmation::Cancel,
    }
}

/// Items of one list, narrowed by `--grep`
fn list_rows<'a>(
    store: &'a ToDoStore<FileStore>,
    mode: Mode,
    re: Option<&Regex>,
) -> Vec<(ItemId, &'a ToDoItem)> {
    match re {
        Some(re) => search::search_items(store.items(), re, Some(mode))
            .into_iter()
            .filter_map(|hit| store.get(hit.id).map(|item| (hit.id, item)))
            .collect(),
        None => store.items_in(mode).collect(),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CmdResult {
    let store = open_store(data_dir)?;
    let re = match &args.grep {
        Some(pattern) => Some(search::compile_pattern(pattern)?),
        None => None,
    };
    let modes: Vec<Mode> = if args.all {
        Mode::ALL.to_vec()
    } else {
        vec![args.mode.unwrap_or(store.mode())]
    };

    let rows = |mode: Mode| list_rows(&store, mode, re.as_ref());

    if json {
        let lists: Vec<ListJson> = modes
            .iter()
            .map(|&mode| ListJson {
                mode: mode.to_string(),
                items: rows(mode)
                    .into_iter()
                    .map(|(id, item)| item_to_json(id, item))
                    .collect(),
            })
            .collect();
        if args.all {
            return print_json(&lists);
        }
        return match lists.into_iter().next() {
            Some(list) => print_json(&list),
            None => Ok(()),
        };
    }

    if args.all {
        for mode in modes {
            for line in format_list_section(mode, rows(mode)) {
                println!("{}", line);
            }
        }
    } else {
        for mode in modes {
            for (id, item) in rows(mode) {
                println!("{}", format_item_line(id, item));
            }
        }
    }
    Ok(())
}

fn cmd_show_mode(data_dir: &Path, json: bool) -> CmdResult {
    let store = open_store(data_dir)?;
    if json {
        return print_json(&ModeJson {
            mode: store.mode().to_string(),
        });
    }
    println!("{}", store.mode());
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_set_mode(data_dir: &Path, mode: Mode, json: bool) -> CmdResult {
    let (_lock, mut store) = open_store_locked(data_dir)?;
    store.set_mode(mode)?;
    if json {
        return print_json(&ModeJson {
            mode: mode.to_string(),
        });
    }
    println!("{}", mode);
    Ok(())
}

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    let text = text.trim();
    if text.is_empty() {
        return Err("item text is empty".into());
    }
    let (_lock, mut store) = open_store_locked(data_dir)?;
    let id = store.add_item(text)?.ok_or("item text is empty")?;
    if json {
        let item = store.get(id).ok_or_else(|| not_found(id))?;
        return print_json(&item_to_json(id, item));
    }
    println!("{}", id);
    Ok(())
}

fn cmd_toggle(data_dir: &Path, args: IdArgs, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let (_lock, mut store) = open_store_locked(data_dir)?;
    let completed = store.toggle_complete(id)?.ok_or_else(|| not_found(id))?;
    if json {
        return print_json(&ToggleJson { id: id.0, completed });
    }
    println!("{} {}", id, if completed { "done" } else { "not done" });
    Ok(())
}

fn cmd_edit(data_dir: &Path, args: EditArgs, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let text = args.text.join(" ");
    let text = text.trim();
    if text.is_empty() {
        return Err("item text is empty".into());
    }
    let (_lock, mut store) = open_store_locked(data_dir)?;
    if !store.edit_item(id, text)? {
        return Err(not_found(id));
    }
    if json {
        let item = store.get(id).ok_or_else(|| not_found(id))?;
        return print_json(&item_to_json(id, item));
    }
    Ok(())
}

fn cmd_delete(data_dir: &Path, args: DeleteArgs, json: bool) -> CmdResult {
    let id = parse_id(&args.id)?;
    let (_lock, mut store) = open_store_locked(data_dir)?;
    if store.get(id).is_none() {
        return Err(not_found(id));
    }
    let removed = store.delete_item(id, |item| {
        if args.yes {
            Confirmation::Ok
        } else {
            prompt_delete(item, &mut std::io::stdin().lock(), &mut std::io::stderr())
        }
    })?;
    if json {
        return print_json(&DeleteJson {
            id: id.0,
            deleted: removed.is_some(),
        });
    }
    if removed.is_none() {
        eprintln!("cancelled");
    }
    Ok(())
}
