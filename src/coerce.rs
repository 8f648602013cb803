// src/coerce.rs

//! Validation and conversion of one raw token into one typed value, driven
//! by the token's [`ArgumentSpec`] and the invocation context.

use std::fmt;

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::actor::{ActorDirectory, ActorRef};
use crate::duration;
use crate::schema::{ArgumentKind, ArgumentSpec, Axis};
use crate::value::ArgValue;

/// Everything coercion may need from the surrounding invocation: the
/// invoking actor (for self-targeting and relative coordinates) and the
/// host directory of online actors.
pub struct InvocationContext<'a> {
    pub invoker: ActorRef,
    pub directory: &'a dyn ActorDirectory,
}

impl fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("invoker", &self.invoker.name())
            .finish_non_exhaustive()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CoercionError {
    #[error("Argument {name} must be a number")]
    NotANumber { name: String },
    #[error("Argument {name} requires a number greater than or equal to {min}")]
    BelowMinimum { name: String, min: f64 },
    #[error("Argument {name} requires a number less than or equal to {max}")]
    AboveMaximum { name: String, max: f64 },
    #[error("Argument {name} requires an integer number")]
    NotAnInteger { name: String },
    #[error("Argument {name} must be a boolean")]
    NotABoolean { name: String },
    #[error("Literal {name} must be: {allowed}")]
    NotInAllowedValues { name: String, allowed: String },
    #[error("Argument {name} must be at least {min} characters long")]
    StringTooShort { name: String, min: usize },
    #[error("Argument {name} must be at most {max} characters long")]
    StringTooLong { name: String, max: usize },
    #[error("Argument {name} requires a player that is not yourself")]
    SelfTargetForbidden { name: String },
    #[error("Argument of type player must be an online player")]
    PlayerNotOnline,
    #[error("Argument {name} must be of type time")]
    MalformedDuration { name: String },
    #[error("Argument {name} does not accept relative coordinates")]
    RelativeForbidden { name: String },
    #[error("Argument {name} must be of type position")]
    NotAPosition { name: String },
}

/// Validates and converts a single raw token against its spec.
pub fn coerce(
    raw: &str,
    spec: &ArgumentSpec,
    ctx: &InvocationContext<'_>,
) -> Result<ArgValue, CoercionError> {
    let name = spec.name.as_str();
    match &spec.kind {
        ArgumentKind::String {
            min_length,
            max_length,
        } => coerce_string(raw, name, *min_length, *max_length),
        ArgumentKind::Number {
            min,
            max,
            allow_float,
        } => coerce_number(raw, name, *min, *max, *allow_float),
        ArgumentKind::Boolean => match raw {
            "true" => Ok(ArgValue::Boolean(true)),
            "false" => Ok(ArgValue::Boolean(false)),
            _ => Err(CoercionError::NotABoolean {
                name: name.to_string(),
            }),
        },
        ArgumentKind::Literal { allowed_values } => {
            if allowed_values.iter().any(|v| v == raw) {
                Ok(ArgValue::Str(raw.to_string()))
            } else {
                Err(CoercionError::NotInAllowedValues {
                    name: name.to_string(),
                    allowed: allowed_values.join(" | "),
                })
            }
        }
        ArgumentKind::Player { allow_self } => coerce_player(raw, name, *allow_self, ctx),
        ArgumentKind::Time => duration::decode(raw)
            .map(ArgValue::Duration)
            .ok_or_else(|| CoercionError::MalformedDuration {
                name: name.to_string(),
            }),
        ArgumentKind::PositionAxis {
            axis,
            allow_relative,
        } => coerce_axis(raw, name, *axis, *allow_relative, ctx),
    }
}

fn coerce_string(
    raw: &str,
    name: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<ArgValue, CoercionError> {
    let length = raw.chars().count();
    if let Some(min) = min_length
        && length < min
    {
        return Err(CoercionError::StringTooShort {
            name: name.to_string(),
            min,
        });
    }
    if let Some(max) = max_length
        && length > max
    {
        return Err(CoercionError::StringTooLong {
            name: name.to_string(),
            max,
        });
    }
    Ok(ArgValue::Str(raw.to_string()))
}

fn coerce_number(
    raw: &str,
    name: &str,
    min: Option<f64>,
    max: Option<f64>,
    allow_float: bool,
) -> Result<ArgValue, CoercionError> {
    let number = parse_finite(raw).ok_or_else(|| CoercionError::NotANumber {
        name: name.to_string(),
    })?;
    if let Some(min) = min
        && number < min
    {
        return Err(CoercionError::BelowMinimum {
            name: name.to_string(),
            min,
        });
    }
    if let Some(max) = max
        && number > max
    {
        return Err(CoercionError::AboveMaximum {
            name: name.to_string(),
            max,
        });
    }
    if allow_float {
        Ok(ArgValue::Float(number))
    } else if number.fract() == 0.0 {
        Ok(ArgValue::Integer(number as i64))
    } else {
        Err(CoercionError::NotAnInteger {
            name: name.to_string(),
        })
    }
}

/// Parses a numeric token, rejecting `NaN`/`inf` spellings: a non-finite
/// value would slip past the inclusive bounds checks.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn coerce_player(
    raw: &str,
    name: &str,
    allow_self: bool,
    ctx: &InvocationContext<'_>,
) -> Result<ArgValue, CoercionError> {
    let mut target = raw.to_string();
    if target == "@s" || target == "@p" {
        target = ctx.invoker.name().to_string();
    }
    if target == "@r" {
        let online = ctx.directory.all_online();
        let picked = online
            .choose(&mut rand::thread_rng())
            .ok_or(CoercionError::PlayerNotOnline)?;
        target = picked.name().to_string();
    }
    // Any other targeting sigil: strip the leading `@` and use the rest as
    // a plain name.
    if let Some(stripped) = target.strip_prefix('@') {
        target = stripped.trim().to_string();
    }
    if target == ctx.invoker.name() && !allow_self {
        return Err(CoercionError::SelfTargetForbidden {
            name: name.to_string(),
        });
    }
    ctx.directory
        .find_by_name(&target)
        .map(ArgValue::Player)
        .ok_or(CoercionError::PlayerNotOnline)
}

fn coerce_axis(
    raw: &str,
    name: &str,
    axis: Axis,
    allow_relative: bool,
    ctx: &InvocationContext<'_>,
) -> Result<ArgValue, CoercionError> {
    if raw.contains('~') {
        if !allow_relative {
            return Err(CoercionError::RelativeForbidden {
                name: name.to_string(),
            });
        }
        let offset = raw
            .strip_prefix('~')
            .ok_or_else(|| CoercionError::NotAPosition {
                name: name.to_string(),
            })?;
        let position = ctx.invoker.position();
        let base = match axis {
            Axis::X => position.x,
            Axis::Y => position.y,
            Axis::Z => position.z,
        };
        if offset.is_empty() {
            return Ok(ArgValue::AxisValue(base));
        }
        let delta = parse_finite(offset).ok_or_else(|| CoercionError::NotAPosition {
            name: name.to_string(),
        })?;
        Ok(ArgValue::AxisValue(base + delta))
    } else {
        parse_finite(raw)
            .map(ArgValue::AxisValue)
            .ok_or_else(|| CoercionError::NotAPosition {
                name: name.to_string(),
            })
    }
}

// MARK: --- UNIT TESTS ---
