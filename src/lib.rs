// src/lib.rs

//! `chatcmd` lets a host application drive commands from chat-like text
//! lines. Commands declare a recursively-branching argument schema; a line
//! is tokenized, parsed and validated against that schema, and the
//! registered handler receives strongly-typed arguments. All request-path
//! failures surface at a single dispatcher boundary as one invoker-facing
//! message plus a feedback cue.

pub mod actor;
pub mod chat;
pub mod coerce;
pub mod command;
pub mod constants;
pub mod duration;
pub mod form;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod tokenizer;
pub mod value;

pub use actor::{Actor, ActorDirectory, ActorRef, Position};
pub use command::Command;
pub use registry::CommandRegistry;
pub use schema::ArgumentSpec;
pub use value::CommandInteraction;
