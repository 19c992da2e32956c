/// Upper bound on tokens in one command line. Exceeding it is a reported
/// error, never a silent truncation.
pub const MAX_TOKENS: usize = 64;

#[derive(Debug, PartialEq, Eq)]
pub enum TokenizeError {
    TooManyTokens,
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::TooManyTokens => {
                write!(f, "too many tokens (limit {})", MAX_TOKENS)
            }
        }
    }
}

/// One tokenized command line. The slices borrow from the line buffer and
/// must not outlive the loop iteration that read it.
#[derive(Debug, Default, PartialEq)]
pub struct Tokenized<'a> {
    pub argv: Vec<&'a str>,
    pub background: bool,
}

/// Split a line on runs of spaces and tabs. A standalone `&` is consumed
/// and sets the background flag instead of becoming an argument; `<`, `>`,
/// `>>` and `|` are ordinary tokens here and are recognized downstream by
/// content match.
pub fn tokenize(line: &str) -> Result<Tokenized<'_>, TokenizeError> {
    let mut tokens = Tokenized::default();
    for word in line.split([' ', '\t']).filter(|w| !w.is_empty()) {
        if word == "&" {
            tokens.background = true;
            continue;
        }
        if tokens.argv.len() == MAX_TOKENS {
            return Err(TokenizeError::TooManyTokens);
        }
        tokens.argv.push(word);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        let tokens = tokenize("ls -l  /tmp").unwrap();
        assert_eq!(tokens.argv, vec!["ls", "-l", "/tmp"]);
        assert!(!tokens.background);
    }

    #[test]
    fn tabs_count_as_separators() {
        let tokens = tokenize("wc\t-l\tfile").unwrap();
        assert_eq!(tokens.argv, vec!["wc", "-l", "file"]);
    }

    #[test]
    fn trailing_ampersand_sets_background() {
        let tokens = tokenize("sleep 5 &").unwrap();
        assert_eq!(tokens.argv, vec!["sleep", "5"]);
        assert!(tokens.background);
    }

    #[test]
    fn ampersand_is_consumed_anywhere() {
        let tokens = tokenize("sleep & 5").unwrap();
        assert_eq!(tokens.argv, vec!["sleep", "5"]);
        assert!(tokens.background);
    }

    #[test]
    fn attached_ampersand_stays_a_token() {
        let tokens = tokenize("sleep 5&").unwrap();
        assert_eq!(tokens.argv, vec!["sleep", "5&"]);
        assert!(!tokens.background);
    }

    #[test]
    fn whitespace_only_yields_no_tokens() {
        let tokens = tokenize(" \t  ").unwrap();
        assert!(tokens.argv.is_empty());
        assert!(!tokens.background);
    }

    #[test]
    fn rejects_token_overflow() {
        let line = "x ".repeat(MAX_TOKENS + 1);
        assert_eq!(tokenize(&line), Err(TokenizeError::TooManyTokens));
    }
}
