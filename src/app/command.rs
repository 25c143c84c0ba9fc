//! Command parsing for the command line

use super::state::Tab;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Jump to a chapter: :chapter <chapter-id>
    Chapter(String),
    /// Switch tab: :tab <resources|quiz>
    Tab(Tab),
    /// Submit the quiz: :submit
    Submit,
    /// Reset the quiz: :retry
    Retry,
    /// Next chapter: :next
    Next,
    /// Previous chapter: :prev
    Previous,
    /// Toggle playback: :play
    Play,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    Ok(Command),
    UnknownCommand(String),
    MissingArgument(String),
    InvalidArgument { command: String, argument: String },
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

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "chapter" | "ch" | "goto" => {
            if args.is_empty() {
                ParseResult::MissingArgument("chapter".to_string())
            } else {
                ParseResult::Ok(Command::Chapter(args.to_string()))
            }
        }
        "tab" | "t" => {
            if args.is_empty() {
                return ParseResult::MissingArgument("tab".to_string());
            }
            match Tab::parse(args) {
                Some(tab) => ParseResult::Ok(Command::Tab(tab)),
                None => ParseResult::InvalidArgument {
                    command: "tab".to_string(),
                    argument: args.to_string(),
                },
            }
        }
        "submit" | "s" => ParseResult::Ok(Command::Submit),
        "retry" | "reset" | "r" => ParseResult::Ok(Command::Retry),
        "next" | "n" => ParseResult::Ok(Command::Next),
        "prev" | "previous" | "p" => ParseResult::Ok(Command::Previous),
        "play" | "pause" => ParseResult::Ok(Command::Play),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert!(matches!(parse_command("q"), ParseResult::Ok(Command::Quit)));
        assert!(matches!(parse_command("QUIT"), ParseResult::Ok(Command::Quit)));
    }

    #[test]
    fn parse_chapter_command() {
        match parse_command("chapter c2") {
            ParseResult::Ok(Command::Chapter(id)) => assert_eq!(id, "c2"),
            other => panic!("Expected Chapter command, got {:?}", other),
        }
        assert!(matches!(parse_command("ch"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_tab_command() {
        assert!(matches!(parse_command("tab quiz"), ParseResult::Ok(Command::Tab(Tab::Quiz))));
        assert!(matches!(parse_command("tab notes"), ParseResult::InvalidArgument { .. }));
        assert!(matches!(parse_command("tab"), ParseResult::MissingArgument(_)));
    }

    #[test]
    fn parse_quiz_commands() {
        assert!(matches!(parse_command("submit"), ParseResult::Ok(Command::Submit)));
        assert!(matches!(parse_command("reset"), ParseResult::Ok(Command::Retry)));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("notes"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert!(matches!(parse_command("   "), ParseResult::Ok(Command::Nop)));
    }
}
