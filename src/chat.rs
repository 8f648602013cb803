// src/chat.rs

//! The host-facing chat gate: configuration for the command prefix and the
//! entry point that turns an inbound chat message into a dispatch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::actor::{ActorDirectory, ActorRef};
use crate::constants;
use crate::registry::CommandRegistry;

fn default_prefix() -> String {
    constants::DEFAULT_PREFIX.to_string()
}

fn default_admin_tag() -> String {
    constants::DEFAULT_ADMIN_TAG.to_string()
}

/// Startup configuration for the chat boundary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Chat lines starting with this prefix are treated as command
    /// invocations; everything else passes through as plain chat.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Actor tag checked by admin-gated commands.
    #[serde(default = "default_admin_tag")]
    pub admin_tag: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            admin_tag: default_admin_tag(),
        }
    }
}

impl ChatConfig {
    /// Parses a configuration from TOML text. Missing keys fall back to
    /// their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse chat configuration")
    }
}

/// Inspects one inbound chat message. Lines that do not carry the command
/// prefix are left alone (`false`); prefixed lines are stripped, trimmed,
/// and dispatched (`true`, meaning the host should cancel the chat event).
pub fn handle_chat_line(
    registry: &CommandRegistry,
    config: &ChatConfig,
    message: &str,
    sender: &ActorRef,
    directory: &dyn ActorDirectory,
) -> bool {
    let Some(rest) = message.strip_prefix(config.prefix.as_str()) else {
        return false;
    };
    log::debug!("Chat command from {}: {rest}", sender.name());
    registry.execute_command(rest.trim(), sender, directory);
    true
}

// MARK: --- UNIT TESTS ---
