//! Command line parsing

/// Parsed `:` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Jump to a 1-based line number
    GotoLine(usize),
    /// Jump to the last line (`:$`)
    LastLine,
    /// Quit editor
    Quit { force: bool },
    /// Unknown command
    Unknown(String),
}

/// Parse command string (without leading ':')
pub fn parse_command(cmd_str: &str) -> Command {
    let trimmed = cmd_str.trim();

    match trimmed {
        "q" => Command::Quit { force: false },
        "q!" => Command::Quit { force: true },
        "$" => Command::LastLine,
        _ => match trimmed.parse::<usize>() {
            Ok(line) => Command::GotoLine(line),
            Err(_) => Command::Unknown(trimmed.into()),
        },
    }
}
