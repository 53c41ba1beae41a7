//! The line protocol service.
//!
//! A TCP server speaking a human-driven, line-oriented text protocol: on
//! connect the client gets a greeting banner and a prompt; each line is
//! parsed into a [`Command`] and dispatched against the shared word
//! catalogue; every reply is formatted text. Parsing and dispatch are pure
//! and synchronous — the async shell only frames lines and shuttles bytes —
//! so the whole command surface is unit-testable without sockets.
//!
//! The catalogue itself is single-writer; a mutex serializes sessions.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use crate::compare::Key;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::words::{WordList, alphagram};

const LISTING_HEADER: &str = "--- Number - Word ------------------------------- Alphagram -------------=====";
const LISTING_FOOTER: &str = "==========================================================================-----";

/// A parsed protocol command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Add(String),
    Alpha(String),
    Count,
    Exit,
    Help,
    Info,
    List(String),
    Load(Option<String>),
    Quit,
    /// A partially typed QUIT; answered with a hint, never a shutdown.
    QuitHint,
    Search(String),
    SearchAlpha(String),
    Word(Key),
}

/// What the connection should do after sending a reply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Continue,
    Close,
    Shutdown,
}

/// Reply text plus the follow-up action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    pub text: String,
    pub action: Action,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: Action::Continue,
        }
    }
}

/// Parses one input line. Verbs are case-insensitive and the historical
/// abbreviations are accepted.
pub fn parse(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");
    let rest = parts.collect::<Vec<_>>().join(" ");

    match verb.to_uppercase().as_str() {
        "ADD" if !rest.is_empty() => Ok(Command::Add(rest)),
        "ADD" => Err(Error::WrongArity("ADD")),
        "AL" | "ALP" | "ALPH" | "ALPHA" if !rest.is_empty() => Ok(Command::Alpha(rest)),
        "AL" | "ALP" | "ALPH" | "ALPHA" => Err(Error::WrongArity("ALPHA")),
        "CO" | "COU" | "COUN" | "COUNT" => Ok(Command::Count),
        "EXIT" => Ok(Command::Exit),
        "?" | "H" | "HE" | "HEL" | "HELP" => Ok(Command::Help),
        "INFO" => Ok(Command::Info),
        "LS" | "LI" | "LIS" | "LIST" if !rest.is_empty() => Ok(Command::List(rest)),
        "LS" | "LI" | "LIS" | "LIST" => Err(Error::WrongArity("LIST")),
        "LOAD" if rest.is_empty() => Ok(Command::Load(None)),
        "LOAD" => Ok(Command::Load(Some(rest))),
        "QU" | "QUI" => Ok(Command::QuitHint),
        "QUIT" => Ok(Command::Quit),
        "SEARCH" if !rest.is_empty() => Ok(Command::Search(rest)),
        "SEARCH" => Err(Error::WrongArity("SEARCH")),
        "SEARCHALPHA" if !rest.is_empty() => Ok(Command::SearchAlpha(rest)),
        "SEARCHALPHA" => Err(Error::WrongArity("SEARCHALPHA")),
        "WORD" if !rest.is_empty() => rest
            .parse::<Key>()
            .map(Command::Word)
            .map_err(|_| Error::BadKey(rest)),
        "WORD" => Err(Error::WrongArity("WORD")),
        other => Err(Error::UnknownCommand(other.to_string())),
    }
}

/// Parses and dispatches one line, mapping parse errors to usage replies.
pub fn dispatch_line(line: &str, words: &mut WordList) -> Reply {
    match parse(line) {
        Ok(command) => dispatch(command, words),
        Err(Error::WrongArity(verb)) => Reply::text(usage(verb)),
        Err(Error::BadKey(text)) => Reply::text(format!("'{text}' is not a number.\r\nUse: WORD <number>")),
        Err(Error::UnknownCommand(_)) => {
            Reply::text("Unknown command.\r\nType 'HELP' for a list of commands.")
        }
        Err(error) => Reply::text(error.to_string()),
    }
}

fn usage(verb: &str) -> String {
    let usage = match verb {
        "ADD" => "ADD <word>",
        "ALPHA" => "ALPHA <some text>",
        "LIST" => "LIST <pattern>   (use 'LIST ALL' for the full list)",
        "SEARCH" => "SEARCH <word>",
        "SEARCHALPHA" => "SEARCHALPHA <letters>",
        "WORD" => "WORD <number>",
        _ => verb,
    };
    format!("Use: {usage}")
}

/// Executes a command against the catalogue and renders the reply.
pub fn dispatch(command: Command, words: &mut WordList) -> Reply {
    match command {
        Command::Add(word) => {
            words.add_word(&word);
            Reply::text(format!(
                "Adding [{word}] to the word list.\r\nThere are now {} items in the word list.",
                words.len()
            ))
        }
        Command::Alpha(text) => Reply::text(format!(
            "Generating alphagram from [{text}] resulting in [{}]",
            alphagram(&text)
        )),
        Command::Count => Reply::text(format!("There are {} items in the word list.", words.len())),
        Command::Exit => Reply {
            text: "Goodbye.".to_string(),
            action: Action::Close,
        },
        Command::Help => Reply::text(help_text()),
        Command::Info => Reply::text(info_text(words)),
        Command::List(pattern) if pattern.eq_ignore_ascii_case("ALL") => {
            Reply::text(render_listing(words, "ALL", WordList::move_first, |words| {
                words.move_next()
            }))
        }
        Command::List(pattern) => {
            let label = pattern.clone();
            Reply::text(render_listing(
                words,
                &label,
                |words| words.find_first_by_word(&pattern),
                |words| words.find_next_by_word(&pattern),
            ))
        }
        Command::Load(path) => {
            let path = path.unwrap_or_else(|| "words.txt".to_string());
            match words.load_words(path.as_ref()) {
                Ok(added) => Reply::text(format!(
                    "Loaded {added} words from [{path}].\r\nThere are now {} items in the word list.",
                    words.len()
                )),
                Err(error) => Reply::text(format!("{error}")),
            }
        }
        Command::Quit => Reply {
            text: "Shutting down.".to_string(),
            action: Action::Shutdown,
        },
        Command::QuitHint => Reply::text("You must fully type QUIT to halt the application."),
        Command::Search(word) => {
            if words.find_first_by_word(&word) {
                Reply::text(format!("Found a match!\r\n{}", current_row(words)))
            } else {
                Reply::text("No matches!".to_string())
            }
        }
        Command::SearchAlpha(text) => {
            let label = alphagram(&text);
            Reply::text(render_listing(
                words,
                &label,
                |words| words.find_first_by_alphagram(&text),
                |words| words.find_next_by_alphagram(&text),
            ))
        }
        Command::Word(key) => {
            if words.find_first_by_key(key) {
                Reply::text(format!("Found a match!\r\n{}", current_row(words)))
            } else {
                Reply::text("No matches!".to_string())
            }
        }
    }
}

/// One listing row for the record under the cursor.
fn current_row(words: &WordList) -> String {
    format!(
        " {:>8}.   {:<32}     {}",
        words.current_key().unwrap_or(0),
        words.current_word().unwrap_or(""),
        words.current_alphagram().unwrap_or("")
    )
}

/// Renders a framed listing by driving the cursor through `first`/`next`.
fn render_listing(
    words: &mut WordList,
    label: &str,
    first: impl FnOnce(&mut WordList) -> bool,
    mut next: impl FnMut(&mut WordList) -> bool,
) -> String {
    if words.is_empty() {
        return "The word list is empty.".to_string();
    }

    let started = Instant::now();
    let mut out = String::new();
    out.push_str(" Word List:\r\n");
    out.push_str(LISTING_HEADER);
    out.push_str("\r\n");

    let mut matched = 0usize;
    if first(words) {
        loop {
            out.push_str(&current_row(words));
            out.push_str("\r\n");
            matched += 1;
            if !next(words) {
                break;
            }
        }
    }

    out.push_str(LISTING_FOOTER);
    out.push_str("\r\n");
    out.push_str(&format!("{matched} word(s) matched the pattern {label}\r\n"));
    out.push_str(&format!(
        "Effective time to search: {}ms",
        started.elapsed().as_millis()
    ));
    out
}

fn info_text(words: &WordList) -> String {
    let stats = words.stats();
    let mut out = String::new();
    out.push_str("         Word List Information\r\n");
    out.push_str("-------------------------------------------\r\n");
    out.push_str(&format!("         List Count: {}\r\n", words.len()));
    if let (Some(key), Some(word), Some(alpha)) =
        (words.current_key(), words.current_word(), words.current_alphagram())
    {
        out.push_str(&format!("       Current Item: ({key}) {word} ... Alphagram[{alpha}]\r\n"));
    }
    out.push_str(&format!("          Add Count: {}\r\n", stats.adds));
    out.push_str(&format!("       Delete Count: {}\r\n", stats.deletes));
    out.push_str(&format!("       Search Count: {}\r\n", stats.searches));
    out.push_str(&format!(" Search Match Count: {}\r\n", stats.matches));
    out.push_str(&format!("   Navigation Count: {}", stats.navigations));
    out
}

fn help_text() -> String {
    [
        "Available commands:",
        "--------------------------------------------------------------------------=====",
        " ADD <word>            - Add a word to the list",
        " ALPHA <some text>     - Generate an alphagram of the text",
        " COUNT                 - Show the number of words in the list",
        " EXIT                  - Close this session",
        " HELP                  - You're lookin' at it",
        " INFO                  - Some list statistics",
        " LIST <pattern>        - List matching words ('LIST ALL' for all words;",
        "                         wildcards allowed, e.g. '*tion' or 'a*')",
        " LOAD [file]           - Load a newline-separated word file (default 'words.txt')",
        " QUIT                  - Close this session and halt the application",
        " SEARCH <word>         - Find the first word matching a pattern",
        " SEARCHALPHA <letters> - List the words buildable from the letters",
        " WORD <number>         - Display the word with ordinal key <number>",
        "==========================================================================-----",
    ]
    .join("\r\n")
}

// ─── The async shell ─────────────────────────────────────────────────────────

/// Accepts connections until a `QUIT` command or Ctrl-C.
pub async fn serve(config: &Config, words: Arc<Mutex<WordList>>) -> Result<()> {
    let listener = TcpListener::bind((config.bind.as_str(), config.port)).await?;
    info!("listening on {}:{}", config.bind, config.port);

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                info!("client connected from {peer}");
                let words = Arc::clone(&words);
                let greeting = config.greeting.clone();
                let prompt = config.prompt.clone();
                let shutdown = shutdown_tx.clone();
                tokio::spawn(async move {
                    match handle_client(stream, &words, &greeting, &prompt, &shutdown).await {
                        Ok(()) => info!("client {peer} disconnected"),
                        Err(error) => warn!("client {peer} dropped: {error}"),
                    }
                });
            }
            _ = shutdown_rx.recv() => {
                info!("shutdown requested; stopping listener");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted; stopping listener");
                break;
            }
        }
    }
    Ok(())
}

async fn handle_client(
    stream: TcpStream,
    words: &Mutex<WordList>,
    greeting: &str,
    prompt: &str,
    shutdown: &broadcast::Sender<()>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer.write_all(greeting.as_bytes()).await?;
    writer.write_all(format!("\r\n{prompt}").as_bytes()).await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            writer.write_all(format!("\r\n{prompt}").as_bytes()).await?;
            continue;
        }

        let reply = {
            let mut words = words.lock().expect("`server::handle_client()` - word list mutex poisoned!");
            dispatch_line(line, &mut words)
        };

        writer.write_all(reply.text.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
        match reply.action {
            Action::Continue => {
                writer.write_all(format!("\r\n{prompt}").as_bytes()).await?;
            }
            Action::Close => break,
            Action::Shutdown => {
                let _ = shutdown.send(());
                break;
            }
        }
    }
    Ok(())
}
