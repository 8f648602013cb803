// src/constants.rs

/// The default chat prefix that marks a line as a command invocation.
pub const DEFAULT_PREFIX: &str = "!";

/// The default actor tag granting access to admin-gated commands.
pub const DEFAULT_ADMIN_TAG: &str = "admin";

/// Sound cue played to the invoker when a command fails.
pub const FAILURE_SOUND: &str = "block.false_permissions";

/// Chat formatting code prepended to invoker-facing failure messages.
pub const ERROR_COLOR: &str = "\u{a7}c";

/// How many times a form re-presents itself while the target actor is busy.
pub const FORM_BUSY_RETRIES: u32 = 100;
