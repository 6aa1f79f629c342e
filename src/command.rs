use std::path::PathBuf;
use std::str::FromStr;

use events_core::EventId;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  show              Show the event groups
  search <text>     Filter by event name or category
  pick <name>       Show only the event with exactly this name
  clear             Clear search and pick
  suggest <text>    List event names matching the text
  attend <id>       Attend, or stop attending, an event
  more <date>       Show more events of a date group
  selected          List the events you are attending
  export <path>     Write the events you are attending as an iCalendar file
  help              Show this help
  quit              Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Search(String),
    Pick(String),
    Clear,
    Suggest(String),
    Attend(EventId),
    More(String),
    Selected,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let required = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        Ok(match name.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "show" | "ls" => Command::Show,
            // An empty search clears, like emptying the search box.
            "search" => Command::Search(rest.to_string()),
            "pick" => Command::Pick(required("pick")?),
            "clear" => Command::Clear,
            "suggest" => Command::Suggest(rest.to_string()),
            "attend" => Command::Attend(EventId(required("attend")?)),
            "more" => Command::More(required("more")?),
            "selected" => Command::Selected,
            "export" => Command::Export(PathBuf::from(required("export")?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("show"), Ok(Command::Show));
        assert_eq!(parse("  SEARCH  campus tour "), Ok(Command::Search("campus tour".into())));
        assert_eq!(parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(parse("pick Gala"), Ok(Command::Pick("Gala".into())));
        assert_eq!(parse("attend 17"), Ok(Command::Attend(EventId::from("17"))));
        assert_eq!(parse("more 2024-05-01"), Ok(Command::More("2024-05-01".into())));
        assert_eq!(
            parse("export out/attending.ics"),
            Ok(Command::Export(PathBuf::from("out/attending.ics")))
        );
        assert_eq!(parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn keeps_argument_case() {
        assert_eq!(parse("pick Alumni BBQ"), Ok(Command::Pick("Alumni BBQ".into())));
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("attend"), Err(CommandError::MissingArgument("attend")));
        assert_eq!(
            parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
