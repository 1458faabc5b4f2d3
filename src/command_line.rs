use serde::Serialize;
use std::fmt;

/// A client command as an ordered list of tokens, e.g. `SET foo bar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Splits on any run of whitespace. Quoting is not interpreted.
    pub fn parse(input: &str) -> Self {
        Self {
            tokens: input.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Joins `tokens` with spaces and re-splits them, so tokens containing
    /// whitespace are split further and empty tokens disappear.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse(
            &tokens
                .into_iter()
                .map(|t| t.as_ref().to_string())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_whitespace() {
        let cmd = CommandLine::parse("SET test123 gonsnoig px 5000");
        assert_eq!(cmd.tokens(), ["SET", "test123", "gonsnoig", "px", "5000"]);
    }

    #[test]
    fn parse_collapses_runs_of_whitespace() {
        let cmd = CommandLine::parse("  GET \t foo\n");
        assert_eq!(cmd.tokens(), ["GET", "foo"]);
    }

    #[test]
    fn parse_blank_is_empty() {
        assert!(CommandLine::parse("   ").is_empty());
        assert!(CommandLine::parse("").is_empty());
    }

    #[test]
    fn token_count_matches_word_count() {
        for input in ["PING", "SET foo bar", " a  b   c    d ", "KEYS *", ""] {
            let cmd = CommandLine::parse(input);
            assert_eq!(cmd.tokens().len(), input.split_whitespace().count());
        }
    }

    #[test]
    fn rejoined_display_parses_to_same_tokens() {
        let cmd = CommandLine::parse("CONFIG   GET\tdir");
        assert_eq!(cmd.to_string(), "CONFIG GET dir");
        assert_eq!(CommandLine::parse(&cmd.to_string()), cmd);
    }

    #[test]
    fn from_tokens_resplits_embedded_spaces() {
        let cmd = CommandLine::from_tokens(["SET foo", "bar"]);
        assert_eq!(cmd.tokens(), ["SET", "foo", "bar"]);
    }

    #[test]
    fn from_tokens_drops_empty_tokens() {
        let cmd = CommandLine::from_tokens(["SET", "k", ""]);
        assert_eq!(cmd.tokens(), ["SET", "k"]);
    }

    #[test]
    fn serializes_as_token_array() {
        let cmd = CommandLine::parse("GET foo");
        assert_eq!(serde_json::to_string(&cmd).unwrap(), r#"["GET","foo"]"#);
    }
}
