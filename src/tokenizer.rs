// src/tokenizer.rs

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// A token is either a double-quoted segment (quotes stripped, content
    /// verbatim) or a maximal run of non-whitespace characters.
    static ref TOKEN_RE: Regex = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Command line must be a non-empty string.")]
    EmptyInput,
    #[error("No valid tokens found in command line.")]
    NoTokens,
}

/// A command line split into its name and ordered raw argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub name: String,
    pub raw_args: Vec<String>,
}

/// Splits a raw command line into a command name plus raw argument tokens,
/// honoring double-quoted segments.
pub fn tokenize(line: &str) -> Result<TokenizedLine, TokenizeError> {
    if line.is_empty() {
        return Err(TokenizeError::EmptyInput);
    }

    let mut tokens = TOKEN_RE.captures_iter(line).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map_or(String::new(), |m| m.as_str().to_string())
    });

    // An empty quoted segment can never name a command.
    let name = tokens.next().filter(|n| !n.is_empty()).ok_or(TokenizeError::NoTokens)?;
    Ok(TokenizedLine {
        name,
        raw_args: tokens.collect(),
    })
}

// MARK: --- UNIT TESTS ---
