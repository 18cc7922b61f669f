//! Inbound text commands

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// `/open` or `/start`: list the categories
    Open,
    Stop,
    /// `/report [range]`
    Report(Option<String>),
    Status,
    /// Anything else is a category choice, resolved against the tree later
    Choose(String),
    Empty,
}

pub(crate) fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "/open" | "/start" => Command::Open,
        "/stop" => Command::Stop,
        "/status" => Command::Status,
        "/report" => Command::Report((!rest.is_empty()).then(|| rest.to_string())),
        _ => Command::Choose(line.to_string()),
    }
}
