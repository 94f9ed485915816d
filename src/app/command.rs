//! Command parsing for the : command line

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate cards from text: :generate <text>
    Generate(String),
    /// Save the shown cards: :save <topic>
    Save(String),
    /// Study the selected or shown set: :study
    Study,
    /// Reload saved sets: :refresh
    Refresh,
    /// Forget the access token: :logout
    Logout,
    /// Show help: :help or :h
    Help,
    /// Quit the application: :q or :quit
    Quit,
    /// Empty command
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    let with_arg = |name: &str, build: fn(String) -> Command| {
        if args.is_empty() {
            ParseResult::MissingArgument(name.to_string())
        } else {
            ParseResult::Ok(build(args.to_string()))
        }
    };

    match cmd.to_lowercase().as_str() {
        "generate" | "gen" | "g" => with_arg("generate", Command::Generate),
        "save" | "w" => with_arg("save", Command::Save),
        "study" | "s" => ParseResult::Ok(Command::Study),
        "refresh" | "r" => ParseResult::Ok(Command::Refresh),
        "logout" => ParseResult::Ok(Command::Logout),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
