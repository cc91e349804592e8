//! Shell-style command tokenizer.
//!
//! Splits a command string into an argv vector using POSIX shell quoting
//! rules, without ever starting a shell:
//!
//! - Unquoted whitespace separates tokens.
//! - Single quotes keep everything literal up to the closing quote.
//! - Double quotes keep whitespace; a backslash inside them only escapes
//!   `$`, `` ` ``, `"`, `\` and newline.
//! - An unquoted backslash escapes the next character (backslash-newline
//!   is a line continuation).
//! - Adjacent segments join into one token: `a"b c"d` becomes `ab cd`.
//! - A `#` at the start of a word begins a comment.
//!
//! Unmatched quotes and a trailing backslash are errors.

use thiserror::Error;

/// The command string could not be split into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse command '{command}': missing closing quote or dangling backslash")]
pub struct TokenizeError {
    /// The command string that failed to parse.
    pub command: String,
}

/// Split `command` into argv tokens.
pub fn tokenize(command: &str) -> Result<Vec<String>, TokenizeError> {
    let error = || TokenizeError {
        command: command.to_string(),
    };

    // shell-words keeps a lone trailing backslash as a literal character.
    if ends_with_dangling_backslash(command) {
        return Err(error());
    }

    shell_words::split(command).map_err(|_| error())
}

/// True when the last character is a backslash outside quotes and comments
/// with nothing left for it to escape.
fn ends_with_dangling_backslash(command: &str) -> bool {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Unquoted,
        SingleQuoted,
        DoubleQuoted,
        Comment,
    }

    let mut state = State::Unquoted;
    let mut word_start = true;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match (state, c) {
            (State::Unquoted, '\\') => {
                if chars.next().is_none() {
                    return true;
                }
                word_start = false;
                continue;
            }
            (State::Unquoted, '\'') => state = State::SingleQuoted,
            (State::Unquoted, '"') => state = State::DoubleQuoted,
            (State::Unquoted, '#') if word_start => state = State::Comment,
            (State::SingleQuoted, '\'') => state = State::Unquoted,
            (State::DoubleQuoted, '\\') => {
                // Inside double quotes an unmatched quote is reported anyway.
                chars.next();
            }
            (State::DoubleQuoted, '"') => state = State::Unquoted,
            (State::Comment, '\n') => state = State::Unquoted,
            _ => {}
        }
        word_start = state == State::Unquoted && c.is_whitespace();
    }

    false
}

/// Quote `tokens` into a single string that [`tokenize`] splits back into
/// the same tokens.
pub fn join<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    shell_words::join(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> Vec<String> {
        tokenize(s).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split("echo hello world"), vec!["echo", "hello", "world"]);
        assert_eq!(split("  echo \t hello\n"), vec!["echo", "hello"]);
    }

    #[test]
    fn double_quotes_group_words() {
        assert_eq!(split(r#"echo "a b""#), vec!["echo", "a b"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(split(r#"echo '$HOME "x" \n'"#), vec!["echo", r#"$HOME "x" \n"#]);
    }

    #[test]
    fn backslash_escapes_inside_double_quotes() {
        assert_eq!(split(r#"echo "say \"hi\" \$x \a""#), vec!["echo", r#"say "hi" $x \a"#]);
    }

    #[test]
    fn unquoted_backslash_escapes_next_char() {
        assert_eq!(split(r"touch my\ file"), vec!["touch", "my file"]);
        assert_eq!(split("echo a\\\nb"), vec!["echo", "ab"]);
    }

    #[test]
    fn adjacent_segments_join() {
        assert_eq!(split(r#"a"b c"d"#), vec!["ab cd"]);
        assert_eq!(split(r#"--name='x y'"#), vec!["--name=x y"]);
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        assert_eq!(split(r#"printf "" x"#), vec!["printf", "", "x"]);
    }

    #[test]
    fn comment_at_word_start_is_dropped() {
        assert_eq!(split("echo hi # trailing words"), vec!["echo", "hi"]);
        assert_eq!(split("echo a#b"), vec!["echo", "a#b"]);
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn unmatched_quote_is_error() {
        let err = tokenize(r#"echo "unmatched"#).unwrap_err();
        assert_eq!(err.command, r#"echo "unmatched"#);
        assert!(err.to_string().contains("failed to parse command"));

        assert!(tokenize("echo 'open").is_err());
        assert!(tokenize("echo trailing\\").is_err());
    }

    #[test]
    fn trailing_backslash_rules() {
        assert!(tokenize("echo a\\").is_err());
        assert!(tokenize("echo a\\\\\\").is_err());
        assert_eq!(split("echo a\\\\"), vec!["echo", "a\\"]);
        assert_eq!(split(r"echo 'a\'"), vec!["echo", "a\\"]);
        assert_eq!(split(r#"echo "a\\""#), vec!["echo", "a\\"]);
        assert_eq!(split("echo hi # note\\"), vec!["echo", "hi"]);
        assert!(tokenize(r"echo 'a\'\").is_err());
    }

    #[test]
    fn join_quotes_tokens_that_need_it() {
        let tokens = vec!["echo", "a b", "it's", ""];
        let joined = join(&tokens);
        assert_eq!(split(&joined), tokens);
        assert_eq!(join(["ls", "-la"]), "ls -la");
    }
}
