// src/main.rs

//! Interactive demo: an in-memory world with a couple of players, the
//! original example commands registered, and a stdin loop acting as the
//! chat stream of the first player.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use chatcmd::actor::{Actor, ActorDirectory, ActorRef, Position};
use chatcmd::chat::{self, ChatConfig};
use chatcmd::command::Command;
use chatcmd::duration::{self, EncodeOptions};
use chatcmd::form::{ActionForm, FormPresenter, FormResponse, FormView};
use chatcmd::registry::CommandRegistry;
use chatcmd::schema::ArgumentSpec;

/// chatcmd demo shell. Type chat lines; prefixed ones run commands.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Command prefix (overridden by --config if given).
    #[arg(long, default_value = chatcmd::constants::DEFAULT_PREFIX)]
    prefix: String,

    /// Optional TOML config file with `prefix` and `admin_tag` keys.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct ConsoleActor {
    name: String,
    position: Position,
    tags: Vec<String>,
}

impl Actor for ConsoleActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Position {
        self.position
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn send_message(&self, message: &str) {
        println!("{} {}", format!("[to {}]", self.name).dimmed(), message);
    }

    fn play_sound(&self, sound_id: &str) {
        println!("{}", format!("* {} hears {}", self.name, sound_id).dimmed());
    }
}

struct ConsoleWorld {
    online: Vec<ActorRef>,
}

impl ActorDirectory for ConsoleWorld {
    fn find_by_name(&self, name: &str) -> Option<ActorRef> {
        self.online.iter().find(|a| a.name() == name).cloned()
    }

    fn all_online(&self) -> Vec<ActorRef> {
        self.online.clone()
    }
}

/// Prints the form and presses the first button.
struct ConsolePresenter;

impl FormPresenter for ConsolePresenter {
    fn present(&self, actor: &ActorRef, view: &FormView) -> FormResponse {
        if let Some(title) = &view.title {
            actor.send_message(&format!("=== {title} ==="));
        }
        if let Some(body) = &view.body {
            actor.send_message(body);
        }
        for (index, button) in view.buttons.iter().enumerate() {
            actor.send_message(&format!("  [{index}] {}", button.text));
        }
        FormResponse::Selected(0)
    }
}

fn register_demo_commands(registry: &mut CommandRegistry, admin_tag: &str) -> Result<()> {
    registry.register(
        Command::new("ping", |interaction| {
            interaction.invoker().send_message("Pong");
            Ok(())
        })
        .description("Ping Pong")
        .category("demo"),
    )?;

    let tag = admin_tag.to_string();
    registry.register(
        Command::new("player", |interaction| {
            let action = match interaction.get_string("action")? {
                "ban" => "banned",
                _ => "kicked",
            };
            let target = interaction.get_player("target")?;
            interaction
                .invoker()
                .send_message(&format!("You have {action} {} from your server!", target.name()));
            Ok(())
        })
        .description("Kick or ban players from your server!")
        .category("demo")
        .args(vec![
            ArgumentSpec::literal("action", true, &["kick", "ban"]),
            ArgumentSpec::player("target", true, false),
        ])
        .permission(move |actor| actor.has_tag(&tag)),
    )?;

    let tag = admin_tag.to_string();
    registry.register(
        Command::new("game", |interaction| {
            let game_id = interaction.get_string("gameId")?;
            let action = interaction.get_string("action")?;
            let detail = match (game_id, action) {
                ("skywars", "setloot") => format!("loot set to {}", interaction.get_string("loot")?),
                ("skywars", "setmap") => format!("map set to {}", interaction.get_string("map")?),
                ("eggwars", "seteggskin") => {
                    format!("egg skin set to {}", interaction.get_string("eggskin")?)
                }
                ("eggwars", "setplayerteam") => format!(
                    "{} moved to team {}",
                    interaction.get_player("target")?.name(),
                    interaction.get_string("team")?
                ),
                _ => anyhow::bail!("unexpected game/action combination"),
            };
            interaction
                .invoker()
                .send_message(&format!("[{game_id}] {detail}"));
            Ok(())
        })
        .description("Manage games")
        .category("demo")
        .args(vec![ArgumentSpec::literal("gameId", true, &["skywars", "eggwars"])
            .branch(
                "skywars",
                vec![ArgumentSpec::literal("action", true, &["setloot", "setmap"])
                    .branch(
                        "setloot",
                        vec![ArgumentSpec::literal(
                            "loot",
                            true,
                            &["common", "rare", "epic", "legendary"],
                        )],
                    )
                    .branch(
                        "setmap",
                        vec![ArgumentSpec::literal("map", true, &["desert", "lava", "grass"])],
                    )],
            )
            .branch(
                "eggwars",
                vec![ArgumentSpec::literal(
                    "action",
                    true,
                    &["seteggskin", "setplayerteam"],
                )
                .branch(
                    "seteggskin",
                    vec![ArgumentSpec::literal(
                        "eggskin",
                        true,
                        &["winter", "halloween", "normal"],
                    )],
                )
                .branch(
                    "setplayerteam",
                    vec![
                        ArgumentSpec::player("target", true, true),
                        ArgumentSpec::literal("team", true, &["yellow", "blue", "red", "black"]),
                    ],
                )],
            )])
        .permission(move |actor| actor.has_tag(&tag)),
    )?;

    let mut tp_args = vec![ArgumentSpec::literal(
        "dimension",
        true,
        &["overworld", "the_end", "nether"],
    )];
    tp_args.extend(ArgumentSpec::position("location", true, true));
    registry.register(
        Command::new("tp", |interaction| {
            let dimension = interaction.get_string("dimension")?;
            let location = interaction.get_position("location")?;
            interaction
                .invoker()
                .send_message(&format!("You have been teleported to {location} in {dimension}"));
            Ok(())
        })
        .description("Teleport to dimension")
        .category("demo")
        .args(tp_args),
    )?;

    registry.register(
        Command::new("mute", |interaction| {
            let target = interaction.get_player("target")?;
            let ms = interaction.get_time("length")?;
            let pretty = duration::encode(
                ms,
                &EncodeOptions {
                    compact: true,
                    full: true,
                    avoid_units: Vec::new(),
                },
            );
            interaction
                .invoker()
                .send_message(&format!("Muted {} for {pretty}", target.name()));
            Ok(())
        })
        .description("Mute a player for a duration")
        .category("demo")
        .args(vec![
            ArgumentSpec::player("target", true, false),
            ArgumentSpec::time("length", true),
        ]),
    )?;

    registry.register(
        Command::new("form", |interaction| {
            ActionForm::new()
                .title("chatcmd demo")
                .body("You are using the chatcmd demo shell!")
                .button("Accept", Some("textures/items/paper"), |actor| {
                    actor.send_message("Accepted!");
                })
                .button("Cancel", None, |actor| actor.send_message("Canceled!"))
                .send(interaction.invoker(), &ConsolePresenter)?;
            Ok(())
        })
        .description("Open form")
        .category("demo"),
    )?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            ChatConfig::from_toml_str(&text)?
        }
        None => ChatConfig {
            prefix: cli.prefix.clone(),
            ..ChatConfig::default()
        },
    };

    let steve: ActorRef = Arc::new(ConsoleActor {
        name: "steve".to_string(),
        position: Position::new(10.0, 64.0, -20.0),
        tags: vec![config.admin_tag.clone()],
    });
    let alex: ActorRef = Arc::new(ConsoleActor {
        name: "alex".to_string(),
        position: Position::new(0.0, 70.0, 0.0),
        tags: Vec::new(),
    });
    let world = ConsoleWorld {
        online: vec![steve.clone(), alex],
    };

    let mut registry = CommandRegistry::new();
    register_demo_commands(&mut registry, &config.admin_tag)?;

    println!(
        "{}",
        format!(
            "Chatting as steve. Prefix commands with '{}'; Ctrl-D to quit.",
            config.prefix
        )
        .cyan()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".green());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if !chat::handle_chat_line(&registry, &config, line, &steve, &world) && !line.is_empty() {
            println!("{} {line}", "<steve>".yellow());
        }
    }

    Ok(())
}
