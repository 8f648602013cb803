// src/parser.rs

//! Recursive descent over an argument schema. Tokens are consumed
//! positionally: the spec at position `i` reads the raw token at position
//! `i` of the current token window, and a matching branch recurses into its
//! child list with the tokens after `i`.

use thiserror::Error;

use crate::coerce::{self, CoercionError, InvocationContext};
use crate::schema::ArgumentSpec;
use crate::value::ParsedArguments;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Missing required argument: {0}")]
    MissingArgument(String),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Parses the raw argument tokens against an ordered spec list, producing
/// the complete typed argument map for the invocation.
///
/// The first failure aborts the traversal; no partial result is returned.
pub fn parse(
    specs: &[ArgumentSpec],
    raw_args: &[String],
    ctx: &InvocationContext<'_>,
) -> Result<ParsedArguments, ParseError> {
    let mut parsed = ParsedArguments::new();
    parse_into(specs, raw_args, ctx, &mut parsed)?;
    log::debug!("Parsed arguments: {parsed:?}");
    Ok(parsed)
}

fn parse_into(
    specs: &[ArgumentSpec],
    raw_args: &[String],
    ctx: &InvocationContext<'_>,
    parsed: &mut ParsedArguments,
) -> Result<(), ParseError> {
    for (index, spec) in specs.iter().enumerate() {
        let raw = raw_args.get(index);

        match raw {
            None if spec.required => {
                return Err(ParseError::MissingArgument(spec.name.clone()));
            }
            None => {}
            Some(raw) => {
                let value = coerce::coerce(raw, spec, ctx)?;
                parsed.insert(spec.name.clone(), value);
            }
        }

        // Branch lookup keys on the pre-coercion raw token. An unmatched
        // token simply ends the subtree; that is not an error.
        if let Some(raw) = raw
            && let Some(children) = spec.children_for(raw)
        {
            log::debug!("Taking branch '{}' of argument '{}'", raw, spec.name);
            let remaining = raw_args.get(index + 1..).unwrap_or(&[]);
            parse_into(children, remaining, ctx, parsed)?;
        }
    }
    Ok(())
}

// MARK: --- UNIT TESTS ---
