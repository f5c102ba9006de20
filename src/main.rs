//! Parley CLI entry point.
//!
//! Provides `parse`, `run`, `repl`, and `contacts` subcommands for
//! inspecting intents, dispatching commands, running an interactive
//! session, and managing the contacts file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use parley::config::{contacts_path, load_config, load_default_config, Config};
use parley::contacts::store::{default_contacts, ContactStore, JsonContactStore};
use parley::contacts::Contact;
use parley::dispatch::device::Device;
use parley::dispatch::{Action, Dispatcher, Reply};

/// Parley — voice command interpreter.
#[derive(Parser)]
#[command(name = "parley", version, about)]
struct Cli {
    /// Config file (default: ~/.parley/config.toml, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Show the intent an utterance parses to.
    Parse {
        /// The utterance.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Parse and dispatch one utterance.
    Run {
        /// The utterance.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Read utterances from stdin, one per line, until EOF.
    Repl {
        /// Also write JSON logs to this directory.
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Manage saved contacts.
    Contacts {
        /// Contacts action.
        #[command(subcommand)]
        command: ContactsCommand,
    },
}

/// Contacts subcommands.
#[derive(Subcommand)]
enum ContactsCommand {
    /// List saved contacts.
    List,
    /// Add a contact, or update the number of an existing one.
    Add {
        /// Display name.
        name: String,
        /// Phone number.
        number: String,
    },
    /// Remove a contact by name.
    Remove {
        /// Display name (case-insensitive).
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };

    let _logging_guard = match &cli.command {
        Command::Repl {
            log_dir: Some(dir), ..
        } => Some(parley::logging::init_file(dir, &config.logging.level)?),
        _ => {
            parley::logging::init_cli(&config.logging.level);
            None
        }
    };

    match cli.command {
        Command::Parse { text } => handle_parse(&text.join(" "), cli.json),
        Command::Run { text } => {
            let dispatcher = build_dispatcher(&config)?;
            handle_run(&dispatcher, &text.join(" "), cli.json)
        }
        Command::Repl { .. } => {
            let dispatcher = build_dispatcher(&config)?;
            handle_repl(&dispatcher, cli.json)
        }
        Command::Contacts { command } => handle_contacts(&config, command, cli.json),
    }
}

fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let path = contacts_path(config)?;
    debug!(contacts = %path.display(), "building dispatcher");
    Ok(Dispatcher::new(Box::new(JsonContactStore::new(path)))
        .with_apps(config.app_directory())
        .with_resolver(config.contact_resolver())
        .with_device(Device::host()))
}

/// Print the parsed intent as JSON, pretty-printed unless `--json`.
fn handle_parse(text: &str, json: bool) -> anyhow::Result<()> {
    let intent = parley::parse(text);
    if json {
        println!("{}", serde_json::to_string(&intent)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&intent)?);
    }
    Ok(())
}

/// Dispatch a single utterance and print the reply.
fn handle_run(dispatcher: &Dispatcher, text: &str, json: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if let Some(reply) = dispatcher.handle(text) {
        write_reply(&mut stdout, &reply, json)?;
    }
    Ok(())
}

/// Dispatch every stdin line until EOF.
fn handle_repl(dispatcher: &Dispatcher, json: bool) -> anyhow::Result<()> {
    info!("interactive session started");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let mut handled: u64 = 0;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if let Some(reply) = dispatcher.handle(&line) {
            write_reply(&mut stdout, &reply, json)?;
            stdout.flush()?;
            handled = handled.saturating_add(1);
        }
    }
    info!(handled, "interactive session ended");
    Ok(())
}

fn write_reply(out: &mut impl Write, reply: &Reply, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(reply)?)?;
        return Ok(());
    }
    writeln!(out, "{}", reply.text)?;
    match &reply.action {
        Action::OpenUri { uri } => writeln!(out, "  open: {uri}")?,
        Action::OpenUrl { url } => writeln!(out, "  open (new tab): {url}")?,
        Action::Speak => {}
    }
    Ok(())
}

fn handle_contacts(config: &Config, command: ContactsCommand, json: bool) -> anyhow::Result<()> {
    let store = JsonContactStore::new(contacts_path(config)?);

    let contacts = match command {
        ContactsCommand::List => {
            let contacts = store.load();
            if json {
                println!("{}", serde_json::to_string(&contacts)?);
            } else {
                for contact in &contacts {
                    println!("{}\t{}", contact.name, contact.number);
                }
            }
            return Ok(());
        }
        ContactsCommand::Add { name, number } => {
            let name = name.trim().to_owned();
            anyhow::ensure!(!name.is_empty(), "contact name must not be empty");
            let mut contacts = editable_contacts(&store)?;
            match contacts.iter_mut().find(|c| same_name(&c.name, &name)) {
                Some(existing) => {
                    existing.number = number;
                    println!("Updated {}.", existing.name);
                }
                None => {
                    println!("Added {name}.");
                    contacts.push(Contact::new(name, number));
                }
            }
            contacts
        }
        ContactsCommand::Remove { name } => {
            let mut contacts = editable_contacts(&store)?;
            let before = contacts.len();
            contacts.retain(|c| !same_name(&c.name, &name));
            anyhow::ensure!(contacts.len() < before, "no contact named {name}");
            println!("Removed {}.", name.trim());
            contacts
        }
    };

    store
        .save(&contacts)
        .with_context(|| format!("failed to save {}", store.path().display()))
}

/// Contacts to edit, read strictly so a damaged file is never overwritten.
fn editable_contacts(store: &JsonContactStore) -> anyhow::Result<Vec<Contact>> {
    let contacts = store
        .try_load()
        .with_context(|| format!("refusing to edit {}", store.path().display()))?;
    Ok(contacts.unwrap_or_else(default_contacts))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
