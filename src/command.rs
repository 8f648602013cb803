// src/command.rs

use std::fmt;

use anyhow::Result;

use crate::actor::ActorRef;
use crate::schema::ArgumentSpec;
use crate::value::CommandInteraction;

/// The callback invoked once a command line has been fully parsed and
/// permission-checked.
pub type CommandHandler = Box<dyn Fn(&CommandInteraction) -> Result<()> + Send + Sync>;

/// Gate deciding whether an actor may run a command.
pub type PermissionPredicate = Box<dyn Fn(&ActorRef) -> bool + Send + Sync>;

/// A registered command: its primary name, aliases, argument schema,
/// optional permission gate, handler, and display metadata the core itself
/// ignores.
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub args: Vec<ArgumentSpec>,
    pub description: String,
    pub category: String,
    permission: Option<PermissionPredicate>,
    handler: CommandHandler,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("args", &self.args)
            .field("has_permission_gate", &self.permission.is_some())
            .finish_non_exhaustive()
    }
}

impl Command {
    pub fn new(
        name: &str,
        handler: impl Fn(&CommandInteraction) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            args: Vec::new(),
            description: String::new(),
            category: String::new(),
            permission: None,
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    #[must_use]
    pub fn args(mut self, args: Vec<ArgumentSpec>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Restricts the command to actors the predicate accepts. Rejection is
    /// rendered as an unknown command, never as a permission error.
    #[must_use]
    pub fn permission(mut self, predicate: impl Fn(&ActorRef) -> bool + Send + Sync + 'static) -> Self {
        self.permission = Some(Box::new(predicate));
        self
    }

    /// Whether the actor passes the permission gate (trivially true when no
    /// gate is set).
    pub fn permits(&self, actor: &ActorRef) -> bool {
        self.permission.as_ref().is_none_or(|p| p(actor))
    }

    /// Runs the handler.
    pub fn invoke(&self, interaction: &CommandInteraction) -> Result<()> {
        (self.handler)(interaction)
    }

    /// Whether `name` is one of this command's aliases.
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|a| a == name)
    }
}
