//! Browse command implementation.
//!
//! Line protocol read from stdin:
//! - plain text: type the query and search
//! - empty line: search again with the current text
//! - `:text <t>`, `:clear`, `:type <kind|all>`, `:year <digits>`
//! - `:next`, `:prev`, `:page <n>`
//! - `:open <n>`, `:poster-failed <n>`, `:close`
//! - `:help`, `:quit`

use crate::core::controller::{PageController, UserEvent};
use crate::core::input::parse_kind_filter;
use crate::services::catalog::CatalogApi;
use crate::ui::card::build_cards;
use crate::ui::page::render_page;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const HELP: &str = "\
Commands:
  <text>              search for <text>
  (empty line)        search again
  :text <text>        edit the query without searching
  :clear              clear the query
  :type <kind|all>    filter by movie, series or episode
  :year <yyyy>        filter by year (empty clears)
  :next / :prev       change page
  :page <n>           jump to page n
  :open <n>           show details for card n
  :poster-failed <n>  show the placeholder for card n
  :close              close the details
  :help               show this help
  :quit               exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Type the text and submit.
    Search(String),
    Event(UserEvent),
    /// Select the n-th card (1-based).
    Open(usize),
    /// Record a poster failure for the n-th card (1-based).
    PosterFailed(usize),
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<BrowseCommand> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() {
            BrowseCommand::Event(UserEvent::Submit)
        } else {
            BrowseCommand::Search(line.to_string())
        });
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "text" => BrowseCommand::Event(UserEvent::Type(arg.to_string())),
        "clear" => BrowseCommand::Event(UserEvent::Clear),
        "type" => BrowseCommand::Event(UserEvent::SetKind(parse_kind_filter(arg)?)),
        "year" => BrowseCommand::Event(UserEvent::SetYear(arg.to_string())),
        "next" | "n" => BrowseCommand::Event(UserEvent::NextPage),
        "prev" | "p" => BrowseCommand::Event(UserEvent::PrevPage),
        "page" => BrowseCommand::Event(UserEvent::Page(parse_number(arg)?)),
        "open" | "o" => BrowseCommand::Open(parse_number(arg)?),
        "poster-failed" => BrowseCommand::PosterFailed(parse_number(arg)?),
        "close" | "c" => BrowseCommand::Event(UserEvent::Close),
        "help" | "h" => BrowseCommand::Help,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => bail!("Unknown command :{} (try :help)", other),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(arg: &str) -> Result<T> {
    arg.parse()
        .ok()
        .with_context(|| format!("Expected a number, got {:?}", arg))
}

/// Run an interactive browse session on stdin/stdout.
pub async fn browse<C>(client: C, initial: Option<String>) -> Result<()>
where
    C: CatalogApi + Sync + 'static,
{
    let controller = PageController::new(client);
    if !controller.state().has_credential() {
        tracing::warn!("No OMDb API key configured; search is disabled");
    }

    let lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    run_session(controller, initial, lines, &mut stdout).await?;
    Ok(())
}

/// Drive `controller` from `lines`, rendering to `out` after every change.
///
/// At end of input the session waits for in-flight fetches before returning.
pub async fn run_session<C, R, W>(
    mut controller: PageController<C>,
    initial: Option<String>,
    mut lines: Lines<R>,
    out: &mut W,
) -> Result<PageController<C>>
where
    C: CatalogApi + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(query) = initial {
        dispatch(&mut controller, BrowseCommand::Search(query));
    }
    writeln!(out, "{}\n", render_page(controller.state()))?;

    let mut input_open = true;
    loop {
        if !input_open && !controller.state().is_busy() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(BrowseCommand::Help) => {
                        writeln!(out, "{}\n", HELP)?;
                        continue;
                    }
                    Ok(command) => dispatch(&mut controller, command),
                    Err(e) => {
                        writeln!(out, "{}\n", e.to_string().yellow())?;
                        continue;
                    }
                }
            }
            Some(applied) = controller.next_completion() => {
                if !applied {
                    continue;
                }
            }
        }

        writeln!(out, "{}\n", render_page(controller.state()))?;
    }

    Ok(controller)
}

/// Translate a command into controller events.
fn dispatch<C>(controller: &mut PageController<C>, command: BrowseCommand)
where
    C: CatalogApi + Sync + 'static,
{
    match command {
        BrowseCommand::Search(text) => {
            controller.handle(UserEvent::Type(text));
            controller.handle(UserEvent::Submit);
        }
        BrowseCommand::Event(event) => controller.handle(event),
        BrowseCommand::Open(number) => {
            let event = build_cards(controller.state())
                .iter()
                .find(|card| card.number == number)
                .map(|card| card.select_event());
            match event {
                Some(event) => controller.handle(event),
                None => tracing::debug!("No card {} on this page", number),
            }
        }
        BrowseCommand::PosterFailed(number) => {
            let items = controller.state().items();
            let id = number
                .checked_sub(1)
                .and_then(|i| items.get(i))
                .map(|item| item.id.clone());
            if let Some(id) = id {
                controller.handle(UserEvent::PosterFailed(id));
            }
        }
        BrowseCommand::Help | BrowseCommand::Quit => {}
    }
}
