use gallery_core::ArtworkId;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: the new contents of the search box.
    Type(String),
    Search(String),
    More,
    Retry,
    Clear,
    Show(ArtworkId),
    Back,
    /// Retry the artwork detail.
    Reload,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  <text>         edit the search box (searches after a short pause)
  /search <q>    search now
  /more          load the next page
  /retry         repeat the last failed load
  /clear         reset the search
  /show <id>     open an artwork
  /reload        repeat the artwork load
  /back          close the artwork
  /quit          exit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Type(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "search" | "s" => Command::Search(arg.to_string()),
        "more" | "m" => Command::More,
        "retry" | "r" => Command::Retry,
        "clear" | "c" => Command::Clear,
        "show" => match arg.parse() {
            Ok(id) => Command::Show(id),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "back" | "b" => Command::Back,
        "reload" => Command::Reload,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
