// src/registry.rs

//! The command table and the dispatch entry point.
//!
//! The registry is an explicit value: the host constructs it once at
//! startup, registers every command, and from then on only reads it.
//! `execute_command` is the single error boundary of the request path --
//! every failure underneath it (tokenizing, resolution, parsing, the
//! permission gate, the handler itself) is converted into exactly one
//! invoker-facing message plus a feedback cue.

use thiserror::Error;

use crate::actor::{ActorDirectory, ActorRef};
use crate::coerce::InvocationContext;
use crate::command::Command;
use crate::constants;
use crate::parser::{self, ParseError};
use crate::tokenizer::{self, TokenizeError};
use crate::value::CommandInteraction;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command \"{0}\" is already registered.")]
    DuplicateCommand(String),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// Covers both a failed name/alias lookup and a rejected permission
    /// gate, so the message never reveals which commands exist.
    #[error("Unknown command: {0}. Please check that the command exists and that you have permission to use it.")]
    UnknownCommand(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Handler(anyhow::Error),
}

/// The process-wide command table. Populated during startup registration,
/// read-only during dispatch.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. Primary names must be unique; alias collisions
    /// are not checked and resolve first-match-wins.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.iter().any(|c| c.name == command.name) {
            return Err(RegistryError::DuplicateCommand(command.name.clone()));
        }
        log::debug!("Registered command '{}'", command.name);
        self.commands.push(command);
        Ok(())
    }

    /// Exact primary-name lookup first; on miss, a registration-order scan
    /// of every command's aliases.
    pub fn resolve(&self, name: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.commands.iter().find(|c| c.has_alias(name)))
    }

    /// All registered commands, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Parses and dispatches one command line on behalf of `invoker`.
    ///
    /// Never returns an error: any failure is rendered to the invoker as a
    /// single message plus the failure sound, and the handler is not
    /// invoked.
    pub fn execute_command(&self, line: &str, invoker: &ActorRef, directory: &dyn ActorDirectory) {
        if let Err(err) = self.try_execute(line, invoker, directory) {
            log::warn!("Command '{}' from {} failed: {err}", line, invoker.name());
            invoker.send_message(&format!("{}{err}", constants::ERROR_COLOR));
            invoker.play_sound(constants::FAILURE_SOUND);
        }
    }

    fn try_execute(
        &self,
        line: &str,
        invoker: &ActorRef,
        directory: &dyn ActorDirectory,
    ) -> Result<(), DispatchError> {
        let line = tokenizer::tokenize(line)?;
        let command = self
            .resolve(&line.name)
            .ok_or_else(|| DispatchError::UnknownCommand(line.name.clone()))?;

        let ctx = InvocationContext {
            invoker: invoker.clone(),
            directory,
        };
        let parsed = parser::parse(&command.args, &line.raw_args, &ctx)?;

        if !command.permits(invoker) {
            return Err(DispatchError::UnknownCommand(command.name.clone()));
        }

        let interaction = CommandInteraction::new(parsed, invoker.clone());
        command.invoke(&interaction).map_err(DispatchError::Handler)
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::{FakeActor, FakeDirectory};
    use crate::schema::ArgumentSpec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn noop() -> Command {
        Command::new("noop", |_| Ok(()))
    }

    #[test]
    fn duplicate_primary_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(noop()).unwrap();
        assert_eq!(
            registry.register(noop()),
            Err(RegistryError::DuplicateCommand("noop".to_string()))
        );
    }

    #[test]
    fn resolve_prefers_primary_name_over_alias() {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("first", |_| Ok(())).alias("second"))
            .unwrap();
        registry.register(Command::new("second", |_| Ok(()))).unwrap();

        // `second` is both an alias of `first` and a primary name. The
        // primary-name scan runs first, so the second command wins.
        assert_eq!(registry.resolve("second").unwrap().name, "second");
    }

    #[test]
    fn colliding_aliases_resolve_first_match_wins() {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("first", |_| Ok(())).alias("x"))
            .unwrap();
        registry
            .register(Command::new("other", |_| Ok(())).alias("x"))
            .unwrap();
        assert_eq!(registry.resolve("x").unwrap().name, "first");
    }

    #[test]
    fn unresolved_name_is_none() {
        assert!(CommandRegistry::new().resolve("missing").is_none());
    }

    fn fixture() -> (Arc<FakeActor>, ActorRef, FakeDirectory) {
        let fake = Arc::new(FakeActor::new("steve"));
        let invoker: ActorRef = fake.clone();
        let directory = FakeDirectory::new(vec![invoker.clone()]);
        (fake, invoker, directory)
    }

    #[test]
    fn successful_dispatch_hands_typed_args_to_the_handler() {
        let (fake, invoker, directory) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = CommandRegistry::new();
        registry
            .register(
                Command::new("give", move |interaction| {
                    assert_eq!(interaction.get_string("item").unwrap(), "apple");
                    assert_eq!(interaction.get_integer("amount").unwrap(), 3);
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .args(vec![
                    ArgumentSpec::literal("item", true, &["apple", "bread"]),
                    ArgumentSpec::number("amount", true, Some(1.0), Some(64.0), false),
                ]),
            )
            .unwrap();

        registry.execute_command("give apple 3", &invoker, &directory);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(fake.messages.lock().unwrap().is_empty());
        assert!(fake.sounds.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_command_sends_one_message_and_the_failure_cue() {
        let (fake, invoker, directory) = fixture();
        let registry = CommandRegistry::new();

        registry.execute_command("nope", &invoker, &directory);

        let messages = fake.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Unknown command: nope"));
        assert_eq!(
            fake.sounds.lock().unwrap().as_slice(),
            [constants::FAILURE_SOUND.to_string()]
        );
    }

    #[test]
    fn permission_denial_is_indistinguishable_from_unknown_command() {
        let (fake, invoker, directory) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = CommandRegistry::new();
        registry
            .register(
                Command::new("admin", move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .permission(|actor| actor.has_tag("admin")),
            )
            .unwrap();

        registry.execute_command("admin", &invoker, &directory);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let messages = fake.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Unknown command: admin"));
    }

    #[test]
    fn tagged_actor_passes_the_permission_gate() {
        let fake = Arc::new(FakeActor::with_tag("steve", "admin"));
        let invoker: ActorRef = fake.clone();
        let directory = FakeDirectory::new(vec![invoker.clone()]);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = CommandRegistry::new();
        registry
            .register(
                Command::new("admin", move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .permission(|actor| actor.has_tag("admin")),
            )
            .unwrap();

        registry.execute_command("admin", &invoker, &directory);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(fake.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn parse_failure_never_reaches_the_handler() {
        let (fake, invoker, directory) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = CommandRegistry::new();
        registry
            .register(
                Command::new("count", move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .args(vec![ArgumentSpec::number("n", true, None, None, false)]),
            )
            .unwrap();

        registry.execute_command("count many", &invoker, &directory);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let messages = fake.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("must be a number"));
    }

    #[test]
    fn handler_errors_are_funneled_to_the_invoker() {
        let (fake, invoker, directory) = fixture();
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("boom", |_| Err(anyhow::anyhow!("kaboom"))))
            .unwrap();

        registry.execute_command("boom", &invoker, &directory);

        let messages = fake.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("kaboom"));
    }

    #[test]
    fn alias_dispatch_reaches_the_command() {
        let (_, invoker, directory) = fixture();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut registry = CommandRegistry::new();
        registry
            .register(
                Command::new("teleport", move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .alias("tp"),
            )
            .unwrap();

        registry.execute_command("tp", &invoker, &directory);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
