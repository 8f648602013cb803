// src/value.rs

//! Typed argument values and the interaction handed to command handlers.
//!
//! Every coerced argument lands in the closed [`ArgValue`] union, one
//! variant per argument kind. Handlers project values back out through the
//! checked accessors on [`CommandInteraction`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::actor::{ActorRef, Position};

/// A typed argument value, tagged by the kind that produced it.
#[derive(Clone)]
pub enum ArgValue {
    /// `Literal` and `String` arguments.
    Str(String),
    /// `Number` arguments with `allow_float` unset.
    Integer(i64),
    /// `Number` arguments with `allow_float` set.
    Float(f64),
    /// `Boolean` arguments.
    Boolean(bool),
    /// `Player` arguments, resolved to an online actor handle.
    Player(ActorRef),
    /// `Time` arguments, decoded to milliseconds.
    Duration(i64),
    /// One `PositionAxis` component, relative offsets already applied.
    AxisValue(f64),
}

impl ArgValue {
    /// A short tag for error messages and logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Player(_) => "player",
            Self::Duration(_) => "time",
            Self::AxisValue(_) => "position axis",
        }
    }
}

/// Player handles compare by actor name; every other variant compares by
/// value.
impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Player(a), Self::Player(b)) => a.name() == b.name(),
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::AxisValue(a), Self::AxisValue(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "Str({s:?})"),
            Self::Integer(n) => write!(f, "Integer({n})"),
            Self::Float(n) => write!(f, "Float({n})"),
            Self::Boolean(b) => write!(f, "Boolean({b})"),
            Self::Player(p) => write!(f, "Player({:?})", p.name()),
            Self::Duration(ms) => write!(f, "Duration({ms}ms)"),
            Self::AxisValue(v) => write!(f, "AxisValue({v})"),
        }
    }
}

/// The complete set of typed arguments for one invocation, keyed by
/// argument name. Built fresh per invocation and discarded afterwards.
pub type ParsedArguments = HashMap<String, ArgValue>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgAccessError {
    #[error("Argument \"{0}\" was not provided.")]
    Missing(String),
    #[error("Argument \"{name}\" is not of type {expected} (found {found}).")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// What a command handler receives: the typed arguments plus the invoking
/// actor.
pub struct CommandInteraction {
    args: ParsedArguments,
    invoker: ActorRef,
}

impl fmt::Debug for CommandInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInteraction")
            .field("args", &self.args)
            .field("invoker", &self.invoker.name())
            .finish()
    }
}

impl CommandInteraction {
    pub fn new(args: ParsedArguments, invoker: ActorRef) -> Self {
        Self { args, invoker }
    }

    /// The actor who issued the command line.
    pub fn invoker(&self) -> &ActorRef {
        &self.invoker
    }

    /// Whether the invocation provided this argument (it may be absent when
    /// optional, or when its branch was not taken).
    pub fn has_arg(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// The raw tagged value, if present.
    pub fn get_raw(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    fn get(&self, name: &str) -> Result<&ArgValue, ArgAccessError> {
        self.args
            .get(name)
            .ok_or_else(|| ArgAccessError::Missing(name.to_string()))
    }

    fn wrong_kind(name: &str, expected: &'static str, found: &ArgValue) -> ArgAccessError {
        ArgAccessError::WrongKind {
            name: name.to_string(),
            expected,
            found: found.kind_name(),
        }
    }

    /// A `Literal` or `String` argument.
    pub fn get_string(&self, name: &str) -> Result<&str, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Str(s) => Ok(s),
            other => Err(Self::wrong_kind(name, "string", other)),
        }
    }

    /// A `Number` argument declared without `allow_float`.
    pub fn get_integer(&self, name: &str) -> Result<i64, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Integer(n) => Ok(*n),
            other => Err(Self::wrong_kind(name, "integer", other)),
        }
    }

    /// A `Number` argument declared with `allow_float`.
    pub fn get_float(&self, name: &str) -> Result<f64, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Float(n) => Ok(*n),
            other => Err(Self::wrong_kind(name, "float", other)),
        }
    }

    /// A `Boolean` argument.
    pub fn get_boolean(&self, name: &str) -> Result<bool, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Boolean(b) => Ok(*b),
            other => Err(Self::wrong_kind(name, "boolean", other)),
        }
    }

    /// A `Player` argument.
    pub fn get_player(&self, name: &str) -> Result<&ActorRef, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Player(p) => Ok(p),
            other => Err(Self::wrong_kind(name, "player", other)),
        }
    }

    /// A `Time` argument, in milliseconds.
    pub fn get_time(&self, name: &str) -> Result<i64, ArgAccessError> {
        match self.get(name)? {
            ArgValue::Duration(ms) => Ok(*ms),
            other => Err(Self::wrong_kind(name, "time", other)),
        }
    }

    /// Reassembles a position triple declared via
    /// [`ArgumentSpec::position`](crate::schema::ArgumentSpec::position)
    /// from its `{name}X`/`{name}Y`/`{name}Z` axis components.
    pub fn get_position(&self, name: &str) -> Result<Position, ArgAccessError> {
        let axis = |suffix: &str| -> Result<f64, ArgAccessError> {
            let key = format!("{name}{suffix}");
            match self.get(&key)? {
                ArgValue::AxisValue(v) => Ok(*v),
                other => Err(Self::wrong_kind(&key, "position axis", other)),
            }
        };
        Ok(Position::new(axis("X")?, axis("Y")?, axis("Z")?))
    }
}

// MARK: --- UNIT TESTS ---
