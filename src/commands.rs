use crate::controller::Event;
use crate::error::{BrowserError, Result};
use crate::models::Direction;

pub const HELP: &str = "\
Commands:
  search <query>        search recipes
  page <n>              show page n of the results
  open <id> | #<id>     show a recipe
  + | -                 more or fewer servings
  add                   add the recipe's ingredients to the shopping list
  rm <item-id>          remove a shopping list item
  count <item-id> <n>   change a shopping list item's count
  like                  like or unlike the recipe
  help                  show this help
  quit                  exit";

/// A line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if let Some(fragment) = line.strip_prefix('#') {
        return Ok(Command::Event(Event::HashChange {
            location: format!("#{}", fragment.trim()),
        }));
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    let event = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "search" | "s" => Event::SearchSubmitted(required(rest, "search <query>")?.to_string()),
        "page" | "p" => {
            let page = required(rest, "page <n>")?;
            Event::PageRequested(page.parse().map_err(|_| invalid("page", page))?)
        }
        "open" | "o" => Event::HashChange {
            location: format!("#{}", required(rest, "open <id>")?),
        },
        "+" => Event::Servings(Direction::Inc),
        "-" => Event::Servings(Direction::Dec),
        "add" => Event::AddToList,
        "rm" => Event::DeleteItem(required(rest, "rm <item-id>")?.to_string()),
        "count" => {
            let usage = "count <item-id> <n>";
            let (id, count) = required(rest, usage)?
                .split_once(char::is_whitespace)
                .ok_or_else(|| BrowserError::Validation(format!("usage: {usage}")))?;
            let count = count.trim();
            Event::UpdateCount(
                id.to_string(),
                count.parse().map_err(|_| invalid("count", count))?,
            )
        }
        "like" => Event::ToggleLike,
        "" => return Err(BrowserError::Validation("empty command".to_string())),
        other => {
            return Err(BrowserError::Validation(format!(
                "unknown command {other:?}, try \"help\""
            )))
        }
    };
    Ok(Command::Event(event))
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(BrowserError::Validation(format!("usage: {usage}")))
    } else {
        Ok(value)
    }
}

fn invalid(what: &str, value: &str) -> BrowserError {
    BrowserError::Validation(format!("{what} must be a number, got {value:?}"))
}
