//! REPL command parsing
//!
//! Turns a line of user input into a `Command`. Matching is case-insensitive
//! because input is lowercased before lookup.

/// Name and help text of every command, in the order `help` lists them
pub const COMMANDS: [(&str, &str); 8] = [
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the next page of location areas"),
    ("mapb", "Displays the previous page of location areas"),
    ("explore", "Lists the Pokemon found in a location area"),
    ("catch", "Throws a Pokeball at a Pokemon"),
    ("inspect", "Shows details of a caught Pokemon"),
    ("pokedex", "Lists every Pokemon you have caught"),
];

/// A parsed REPL command
///
/// Commands that take a target carry `None` when the argument was omitted;
/// the handler reports that to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(Option<String>),
    Catch(Option<String>),
    Inspect(Option<String>),
    Pokedex,
}

impl Command {
    /// Parses a command name and its arguments
    ///
    /// # Returns
    /// * `Some(Command)` if `name` is a known command
    /// * `None` otherwise
    pub fn parse(name: &str, args: &[String]) -> Option<Command> {
        let target = args.first().cloned();
        match name {
            "help" => Some(Command::Help),
            "exit" => Some(Command::Exit),
            "map" => Some(Command::Map),
            "mapb" => Some(Command::MapBack),
            "explore" => Some(Command::Explore(target)),
            "catch" => Some(Command::Catch(target)),
            "inspect" => Some(Command::Inspect(target)),
            "pokedex" => Some(Command::Pokedex),
            _ => None,
        }
    }

    /// The name the user types for this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore(_) => "explore",
            Command::Catch(_) => "catch",
            Command::Inspect(_) => "inspect",
            Command::Pokedex => "pokedex",
        }
    }
}

/// Splits input on whitespace and lowercases every word
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
