/// A chat message interpreted as a registry command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Add(String),
    Remove(String),
    List,
    Clear,
    /// Zero-based page index.
    Releases { page: usize },
    Help,
    Ping,
}

impl BotCommand {
    /// Parses `/command args` messages; any other text is an add request.
    ///
    /// `/command@botname` is accepted, unknown commands map to help, and the
    /// releases page argument is one-based.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(rest) = text.strip_prefix('/') else {
            return Self::Add(text.to_string());
        };

        let (word, args) = match rest.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (rest, ""),
        };
        let word = word.split('@').next().unwrap_or(word).to_ascii_lowercase();

        match word.as_str() {
            "add" => Self::Add(args.to_string()),
            "remove" => Self::Remove(args.to_string()),
            "list" => Self::List,
            "clear" | "clearall" => Self::Clear,
            "releases" => Self::Releases {
                page: args
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(1)
                    .saturating_sub(1),
            },
            "ping" => Self::Ping,
            _ => Self::Help,
        }
    }
}
