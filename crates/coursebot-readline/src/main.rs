mod display;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};

use coursebot_core::render::WidgetRenderer;
use coursebot_core::transport::SharedSelection;
use coursebot_core::widget::{MenuOption, Sender};
use coursebot_interaction::config::load_config;
use coursebot_interaction::telemetry::init_tracing;
use coursebot_interaction::{HttpChatTransport, WidgetSession};

use crate::display::markup_to_terminal;

const COMMANDS: &[&str] = &[
    "/open",
    "/close",
    "/qa",
    "/summarize",
    "/feedback",
    "/assist",
    "/transcript",
    "/html",
    "/help",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// What a line of input asks the REPL to do.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Quit,
    Open,
    Close,
    Choose(MenuOption),
    Transcript(Option<&'a str>),
    Html,
    Help,
    Unknown(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    if line == "quit" || line == "exit" {
        return Input::Quit;
    }
    if !line.starts_with('/') {
        return Input::Message(line);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/open" => Input::Open,
        "/close" => Input::Close,
        "/qa" => Input::Choose(MenuOption::QuestionAnswer),
        "/summarize" => Input::Choose(MenuOption::SummarizeLesson),
        "/feedback" => Input::Choose(MenuOption::SubmitFeedback),
        "/assist" => Input::Choose(MenuOption::RequestAssistance),
        "/transcript" => Input::Transcript((!rest.is_empty()).then_some(rest)),
        "/html" => Input::Html,
        "/help" => Input::Help,
        other => Input::Unknown(other),
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  {}", "/open, /close          open or close the widget".yellow());
    println!("  {}", "/qa, /summarize        Q&A mode, summarize the lesson".yellow());
    println!("  {}", "/feedback, /assist     submit feedback, request assistance".yellow());
    println!("  {}", "/transcript [name]     select (or clear) the lesson transcript".yellow());
    println!("  {}", "/html                  print the widget markup".yellow());
    println!("  {}", "quit, exit             leave".yellow());
}

/// The main entry point for the coursebot readline REPL.
///
/// Messages appended to the widget transcript arrive on a channel and are
/// printed by a background task, so slow replies never block the prompt.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn");

    // ===== Backend Initialization =====
    let config = load_config(None)?;
    let container_id = config.container_id.clone();
    let selection = SharedSelection::new(config.default_transcript.clone());
    let transport = HttpChatTransport::new(config)?;

    match transport.prime_csrf().await {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Server did not set an anti-forgery cookie"),
        Err(e) => tracing::warn!(error = %e, "Could not prime anti-forgery cookie"),
    }

    let mut session = WidgetSession::new(Arc::new(transport), Arc::new(selection.clone()));
    let mut message_rx = session.subscribe();
    let session = Arc::new(session);
    let renderer = WidgetRenderer::new()?;

    // User lines are echoed at the prompt; only bot messages are printed here
    let printer = tokio::spawn(async move {
        while let Some(message) = message_rx.recv().await {
            if message.sender == Sender::Bot {
                for line in markup_to_terminal(message.content.as_str()).lines() {
                    println!("{}", line.bright_blue());
                }
                println!();
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Coursebot REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/open' to start, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match parse_input(trimmed) {
                    Input::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Open => session.open().await,
                    Input::Close => session.close().await,
                    Input::Choose(option) => {
                        let session = Arc::clone(&session);
                        tokio::spawn(async move { session.select_option(option).await });
                    }
                    Input::Transcript(Some(name)) => {
                        selection.select(name);
                        println!("{}", format!("Transcript: {}", name).bright_black());
                    }
                    Input::Transcript(None) => {
                        selection.clear();
                        println!("{}", "Transcript cleared".bright_black());
                    }
                    Input::Html => match session.render_html(&renderer, &container_id).await {
                        Ok(html) => println!("{}", html),
                        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                    },
                    Input::Help => print_help(),
                    Input::Unknown(command) => {
                        println!("{}", format!("Unknown command: {}", command).bright_black());
                    }
                    Input::Message(text) => {
                        println!("{}", format!("> {}", text).green());
                        let session = Arc::clone(&session);
                        let text = text.to_string();
                        tokio::spawn(async move { session.submit(&text).await });
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // In-flight requests hold clones of the session; the printer ends once
    // the last one finishes and the sender is dropped.
    drop(session);
    let _ = printer.await;

    Ok(())
}
