//! OpenBot
//!
//! Resolves the bot's startup configuration and prints which run-loops
//! would start.

use clap::Parser;
use console::style;
use openbot::config::{
    self, BotConfig, ChatCredentials, ProcessEnv, ResolvedConfig,
};
use openbot::logging::{init_logger, LogLevel};
use openbot::{Error, Result, VERSION};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "openbot",
    author = "OpenBot Contributors",
    version = VERSION,
    about = "OpenBot - resolve and validate bot startup configuration",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to $OPENBOT_CONFIG or the user config dir)
    #[arg(short, long, env = "OPENBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable the interactive CLI
    #[arg(long)]
    cli: bool,

    /// Enable the scheduler (requires a chat application)
    #[arg(long)]
    scheduler: bool,

    /// Chat application: slack, discord or telegram
    #[arg(long)]
    chat_application: Option<String>,

    /// Print the resolved plan as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Flags only ever switch things on
    fn apply(&self, config: &mut BotConfig) {
        config.debug |= self.debug;
        config.cli |= self.cli;
        config.scheduler |= self.scheduler;
        if let Some(app) = &self.chat_application {
            config.chat_application = app.clone();
        }
    }
}

/// Secret-free summary of a resolved config
#[derive(Serialize)]
struct Plan<'a> {
    name: &'a str,
    log_level: String,
    cli: bool,
    chat: bool,
    scheduler: bool,
    interactive_components: bool,
    chat_application: Option<String>,
    slack_listener_port: Option<&'a str>,
    discord_server_id: Option<&'a str>,
}

impl<'a> Plan<'a> {
    fn new(resolved: &'a ResolvedConfig, level: LogLevel) -> Self {
        let modes = resolved.run_modes;
        let (slack_listener_port, discord_server_id) = match &resolved.chat {
            Some(ChatCredentials::Slack(slack)) => (Some(slack.listener_port.as_str()), None),
            Some(ChatCredentials::Discord(discord)) => (None, discord.server_id.as_deref()),
            _ => (None, None),
        };
        Plan {
            name: &resolved.name,
            log_level: level.to_string(),
            cli: modes.cli,
            chat: modes.chat,
            scheduler: modes.scheduler,
            interactive_components: modes.interactive_components,
            chat_application: resolved.chat.as_ref().map(|c| c.application().to_string()),
            slack_listener_port,
            discord_server_id,
        }
    }
}

fn load(cli: &Cli) -> Result<BotConfig> {
    match &cli.config {
        Some(path) if !path.exists() => Err(Error::InvalidInput(format!(
            "config file {} does not exist",
            path.display()
        ))),
        Some(path) => {
            dotenvy::dotenv().ok();
            let mut config = config::load_config_from_path(path)?;
            config::apply_env_overrides(&mut config, &ProcessEnv);
            Ok(config)
        }
        None => config::load_config(),
    }
}

fn flag(on: bool) -> console::StyledObject<&'static str> {
    if on {
        style("on").green()
    } else {
        style("off").dim()
    }
}

fn print_plan(plan: &Plan<'_>) {
    println!("\n{}", style("OpenBot startup plan").cyan().bold());
    println!("  name:                   {}", plan.name);
    println!("  log level:              {}", plan.log_level);
    println!("  cli:                    {}", flag(plan.cli));
    println!("  chat:                   {}", flag(plan.chat));
    if let Some(app) = &plan.chat_application {
        println!("  chat application:       {}", app);
    }
    println!("  scheduler:              {}", flag(plan.scheduler));
    println!("  interactive components: {}", flag(plan.interactive_components));
    if let Some(port) = plan.slack_listener_port {
        println!("  slack listener port:    {}", port);
    }
    if let Some(id) = plan.discord_server_id {
        println!("  discord server id:      {}", id);
    }
    println!();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Start logging before loading so config warnings are not lost
    let logger = init_logger(LogLevel::from_debug(cli.debug), cli.log_json)?;

    let mut bot = load(&cli)?;
    cli.apply(&mut bot);
    logger.set_level(LogLevel::from_debug(bot.debug))?;

    let resolved = config::configure(&bot, &ProcessEnv)?;
    let plan = Plan::new(&resolved, logger.level());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}
