//! Chat application validation
//!
//! Checks that the requested chat backend has usable credentials and
//! resolves them. A broken backend turns chat off; it never fails startup
//! on its own.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use super::env::{expand_embedded, expand_field, has_placeholder, EnvLookup};
use super::types::channel::{
    ChatApplication, ChatCredentials, DiscordCredentials, SlackCredentials, TelegramCredentials,
    DEFAULT_SLACK_LISTENER_PORT,
};
use super::types::{BotConfig, RunModes};

/// Why chat was turned off
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatDisabled {
    /// Bot name still holds an unresolved placeholder
    #[error("bot name '{0}' contains an unresolved variable")]
    BadName(String),

    /// `chat_application` is not a supported backend
    #[error("unknown chat_application '{0}'")]
    UnknownApplication(String),

    /// Required token missing or unresolved
    #[error("'{0}' is missing or references an unset variable")]
    MissingToken(&'static str),

    /// Signing secret supplied but resolved empty
    #[error("'slack_signing_secret' was supplied but resolved empty")]
    BadSigningSecret,

    /// Server ID supplied but resolved empty
    #[error("'discord_server_id' was supplied but resolved empty")]
    BadServerId,
}

/// Result of chat validation
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Run modes after validation
    pub run_modes: RunModes,
    /// Resolved credentials when chat stays on
    pub credentials: Option<ChatCredentials>,
    /// Every problem found, empty when chat is usable
    pub disabled: Vec<ChatDisabled>,
}

/// Validate the chat backend requested in `config`.
///
/// Does nothing unless `modes.chat` is set. On any problem, chat, the
/// scheduler and interactive components are all switched off.
pub fn configure_chat_application(
    config: &BotConfig,
    modes: RunModes,
    env: &impl EnvLookup,
) -> ChatOutcome {
    if !modes.chat {
        return ChatOutcome {
            run_modes: modes.without_chat(),
            credentials: None,
            disabled: Vec::new(),
        };
    }

    let mut disabled = Vec::new();

    let name = expand_embedded(&config.name, env);
    if has_placeholder(&name) {
        disabled.push(ChatDisabled::BadName(name));
    }

    let credentials = match config.chat_application.parse::<ChatApplication>() {
        Ok(ChatApplication::Slack) => resolve_slack(config, env, &mut disabled),
        Ok(ChatApplication::Discord) => resolve_discord(config, env, &mut disabled),
        Ok(ChatApplication::Telegram) => resolve_telegram(config, env, &mut disabled),
        Err(_) => {
            disabled.push(ChatDisabled::UnknownApplication(
                config.chat_application.clone(),
            ));
            None
        }
    };

    if !disabled.is_empty() {
        for reason in &disabled {
            warn!(
                chat_application = %config.chat_application,
                "Chat disabled: {}", reason
            );
        }
        return ChatOutcome {
            run_modes: modes.without_chat(),
            credentials: None,
            disabled,
        };
    }

    let interactive_components = matches!(
        &credentials,
        Some(ChatCredentials::Slack(slack))
            if slack.signing_secret.is_some() && slack.interactions_callback_path.is_some()
    );

    debug!(
        chat_application = %config.chat_application,
        interactive_components,
        "Chat application configured"
    );

    ChatOutcome {
        run_modes: RunModes {
            interactive_components,
            ..modes
        },
        credentials,
        disabled,
    }
}

/// Whole-field expand a secret, `None` when it resolves empty
fn resolve_secret(raw: &SecretString, env: &impl EnvLookup) -> Option<SecretString> {
    let value = expand_field(raw.expose_secret(), env);
    (!value.is_empty()).then(|| SecretString::from(value))
}

fn resolve_optional(raw: &str, env: &impl EnvLookup) -> Option<String> {
    let value = expand_field(raw, env);
    (!value.is_empty()).then_some(value)
}

fn resolve_slack(
    config: &BotConfig,
    env: &impl EnvLookup,
    disabled: &mut Vec<ChatDisabled>,
) -> Option<ChatCredentials> {
    let token = resolve_secret(&config.slack_token, env);
    if token.is_none() {
        disabled.push(ChatDisabled::MissingToken("slack_token"));
    }

    let app_token = resolve_secret(&config.slack_app_token, env);

    let signing_secret = resolve_secret(&config.slack_signing_secret, env);
    if signing_secret.is_none() && !config.slack_signing_secret.expose_secret().is_empty() {
        disabled.push(ChatDisabled::BadSigningSecret);
    }

    let interactions_callback_path =
        resolve_optional(&config.slack_interactions_callback_path, env);

    let listener_port = resolve_optional(&config.slack_listener_port, env)
        .unwrap_or_else(|| DEFAULT_SLACK_LISTENER_PORT.to_string());

    Some(ChatCredentials::Slack(SlackCredentials {
        token: token?,
        app_token,
        signing_secret,
        interactions_callback_path,
        listener_port,
    }))
}

fn resolve_discord(
    config: &BotConfig,
    env: &impl EnvLookup,
    disabled: &mut Vec<ChatDisabled>,
) -> Option<ChatCredentials> {
    let token = resolve_secret(&config.discord_token, env);
    if token.is_none() {
        disabled.push(ChatDisabled::MissingToken("discord_token"));
    }

    // An omitted server ID is fine, a broken one is not
    let server_id = resolve_optional(&config.discord_server_id, env);
    if server_id.is_none() && !config.discord_server_id.is_empty() {
        disabled.push(ChatDisabled::BadServerId);
    }

    Some(ChatCredentials::Discord(DiscordCredentials {
        token: token?,
        server_id,
    }))
}

fn resolve_telegram(
    config: &BotConfig,
    env: &impl EnvLookup,
    disabled: &mut Vec<ChatDisabled>,
) -> Option<ChatCredentials> {
    let token = resolve_secret(&config.telegram_token, env);
    if token.is_none() {
        disabled.push(ChatDisabled::MissingToken("telegram_token"));
    }

    Some(ChatCredentials::Telegram(TelegramCredentials { token: token? }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MapEnv;
    use crate::config::run_mode::resolve_run_modes;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn test_env() -> MapEnv {
        MapEnv::new()
            .with("TEST_SLACK_TOKEN", "TESTTOKEN")
            .with("TEST_SLACK_APP_TOKEN", "TESTAPPTOKEN")
            .with("TEST_DISCORD_TOKEN", "TESTTOKEN")
            .with("TEST_DISCORD_SERVER_ID", "TESTSERVERID")
            .with("TEST_TELEGRAM_TOKEN", "TESTTOKEN")
            .with("TEST_SLACK_SIGNING_SECRET", "TESTSECRET")
            .with("TEST_SLACK_INTERACTIONS_CALLBACK_PATH", "TESTPATH")
    }

    fn chat_bot(app: &str) -> BotConfig {
        BotConfig {
            cli: true,
            chat_application: app.to_string(),
            ..BotConfig::default()
        }
    }

    fn run(config: &BotConfig, env: &MapEnv) -> ChatOutcome {
        let modes = resolve_run_modes(config).unwrap();
        configure_chat_application(config, modes, env)
    }

    #[test]
    fn test_configure_chat_application_table() {
        let env = test_env();

        let cases: Vec<(&str, BotConfig, bool)> = vec![
            ("No chat application", chat_bot(""), false),
            ("Invalid value for chat_application", chat_bot("fart"), false),
            (
                "Bad name",
                BotConfig {
                    name: "${BOT_NAME}".into(),
                    slack_token: secret("${TEST_SLACK_TOKEN}"),
                    ..chat_bot("slack")
                },
                false,
            ),
            ("Slack - no token", chat_bot("slack"), false),
            (
                "Slack - bad token",
                BotConfig {
                    slack_token: secret("${TOKEN}"),
                    ..chat_bot("slack")
                },
                false,
            ),
            (
                "Slack - bad signing secret",
                BotConfig {
                    slack_token: secret("${TEST_SLACK_TOKEN}"),
                    slack_signing_secret: secret("${TEST_BAD_SIGNING_SECRET}"),
                    ..chat_bot("slack")
                },
                false,
            ),
            (
                "Slack",
                BotConfig {
                    slack_token: secret("${TEST_SLACK_TOKEN}"),
                    slack_app_token: secret("${TEST_SLACK_APP_TOKEN}"),
                    ..chat_bot("slack")
                },
                true,
            ),
            ("Discord - no token", chat_bot("discord"), false),
            (
                "Discord - bad token",
                BotConfig {
                    discord_token: secret("${TOKEN}"),
                    ..chat_bot("discord")
                },
                false,
            ),
            (
                "Discord w/ server id",
                BotConfig {
                    discord_token: secret("${TEST_DISCORD_TOKEN}"),
                    discord_server_id: "${TEST_DISCORD_SERVER_ID}".into(),
                    ..chat_bot("discord")
                },
                true,
            ),
            (
                "Discord w/ bad server id",
                BotConfig {
                    discord_token: secret("${TEST_DISCORD_TOKEN}"),
                    discord_server_id: "${TOKEN}".into(),
                    ..chat_bot("discord")
                },
                false,
            ),
            (
                "Telegram",
                BotConfig {
                    telegram_token: secret("${TEST_TELEGRAM_TOKEN}"),
                    ..chat_bot("telegram")
                },
                true,
            ),
            ("Telegram - no token", chat_bot("telegram"), false),
            (
                "Telegram - bad token",
                BotConfig {
                    telegram_token: secret("${TOKEN}"),
                    ..chat_bot("telegram")
                },
                false,
            ),
        ];

        for (name, config, should_run_chat) in cases {
            let outcome = run(&config, &env);
            assert_eq!(outcome.run_modes.chat, should_run_chat, "{}: chat", name);
            assert!(!outcome.run_modes.interactive_components, "{}: interactive", name);
            assert_eq!(outcome.credentials.is_some(), should_run_chat, "{}: creds", name);
            assert!(outcome.run_modes.cli, "{}: cli", name);
        }
    }

    #[test]
    fn test_disabled_reasons() {
        let env = test_env();

        let outcome = run(&chat_bot("fart"), &env);
        assert_eq!(
            outcome.disabled,
            vec![ChatDisabled::UnknownApplication("fart".into())]
        );

        let outcome = run(&chat_bot("slack"), &env);
        assert_eq!(
            outcome.disabled,
            vec![ChatDisabled::MissingToken("slack_token")]
        );

        let config = BotConfig {
            discord_token: secret("${TEST_DISCORD_TOKEN}"),
            discord_server_id: "${UNSET_ID}".into(),
            ..chat_bot("discord")
        };
        assert_eq!(run(&config, &env).disabled, vec![ChatDisabled::BadServerId]);

        let config = BotConfig {
            name: "bot-${BOT_NAME}".into(),
            ..chat_bot("telegram")
        };
        assert_eq!(
            run(&config, &env).disabled,
            vec![
                ChatDisabled::BadName("bot-${BOT_NAME}".into()),
                ChatDisabled::MissingToken("telegram_token"),
            ]
        );
    }

    #[test]
    fn test_unknown_application_ignores_credentials() {
        let config = BotConfig {
            slack_token: secret("literal-token"),
            discord_token: secret("literal-token"),
            telegram_token: secret("literal-token"),
            ..chat_bot("fart")
        };
        let outcome = run(&config, &test_env());
        assert!(!outcome.run_modes.chat);
        assert!(outcome.credentials.is_none());
    }

    #[test]
    fn test_failed_chat_disables_scheduler() {
        let config = BotConfig {
            scheduler: true,
            ..chat_bot("slack")
        };
        let modes = resolve_run_modes(&config).unwrap();
        assert!(modes.scheduler);

        let outcome = configure_chat_application(&config, modes, &test_env());
        assert!(!outcome.run_modes.chat);
        assert!(!outcome.run_modes.scheduler);
    }

    #[test]
    fn test_scheduler_kept_with_valid_chat() {
        let config = BotConfig {
            scheduler: true,
            telegram_token: secret("${TEST_TELEGRAM_TOKEN}"),
            ..chat_bot("telegram")
        };
        let outcome = run(&config, &test_env());
        assert!(outcome.run_modes.chat);
        assert!(outcome.run_modes.scheduler);
    }

    #[test]
    fn test_literal_credentials_are_used_as_is() {
        let config = BotConfig {
            discord_token: secret("hard-coded"),
            discord_server_id: "1234".into(),
            ..chat_bot("discord")
        };
        match run(&config, &MapEnv::new()).credentials {
            Some(ChatCredentials::Discord(discord)) => {
                assert_eq!(discord.token.expose_secret(), "hard-coded");
                assert_eq!(discord.server_id.as_deref(), Some("1234"));
            }
            other => panic!("expected discord credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_hold_resolved_values() {
        let config = BotConfig {
            slack_token: secret("${TEST_SLACK_TOKEN}"),
            slack_app_token: secret("${TEST_SLACK_APP_TOKEN}"),
            ..chat_bot("slack")
        };
        match run(&config, &test_env()).credentials {
            Some(ChatCredentials::Slack(slack)) => {
                assert_eq!(slack.token.expose_secret(), "TESTTOKEN");
                assert_eq!(
                    slack.app_token.as_ref().map(|t| t.expose_secret()),
                    Some("TESTAPPTOKEN")
                );
                assert!(slack.signing_secret.is_none());
            }
            other => panic!("expected slack credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_interactive_components_need_secret_and_path() {
        let env = test_env();
        let base = BotConfig {
            slack_token: secret("${TEST_SLACK_TOKEN}"),
            ..chat_bot("slack")
        };

        let both = BotConfig {
            slack_signing_secret: secret("${TEST_SLACK_SIGNING_SECRET}"),
            slack_interactions_callback_path: "${TEST_SLACK_INTERACTIONS_CALLBACK_PATH}".into(),
            ..base.clone()
        };
        let outcome = run(&both, &env);
        assert!(outcome.run_modes.chat);
        assert!(outcome.run_modes.interactive_components);

        let secret_only = BotConfig {
            slack_signing_secret: secret("${TEST_SLACK_SIGNING_SECRET}"),
            ..base.clone()
        };
        assert!(!run(&secret_only, &env).run_modes.interactive_components);

        let path_only = BotConfig {
            slack_interactions_callback_path: "/slack/actions".into(),
            ..base
        };
        assert!(!run(&path_only, &env).run_modes.interactive_components);
    }

    fn listener_port(config: &BotConfig, env: &MapEnv) -> String {
        match run(config, env).credentials {
            Some(ChatCredentials::Slack(slack)) => slack.listener_port,
            other => panic!("expected slack credentials, got {:?}", other),
        }
    }

    fn port_bot() -> BotConfig {
        BotConfig {
            slack_token: secret("${TEST_SLACK_TOKEN}"),
            slack_interactions_callback_path: "${TEST_SLACK_INTERACTIONS_CALLBACK_PATH}".into(),
            ..chat_bot("slack")
        }
    }

    #[test]
    fn test_slack_listener_port_reads_from_env() {
        let env = test_env().with("TEST_SLACK_LISTENER_PORT", "TESTPORT");
        let config = BotConfig {
            slack_listener_port: "${TEST_SLACK_LISTENER_PORT}".into(),
            ..port_bot()
        };
        assert_eq!(listener_port(&config, &env), "TESTPORT");
    }

    #[test]
    fn test_slack_listener_port_defaults_when_not_supplied() {
        assert_eq!(
            listener_port(&port_bot(), &test_env()),
            DEFAULT_SLACK_LISTENER_PORT
        );
    }

    #[test]
    fn test_slack_listener_port_defaults_when_env_unset() {
        let config = BotConfig {
            slack_listener_port: "${TEST_SLACK_LISTENER_PORT}".into(),
            ..port_bot()
        };
        assert_eq!(
            listener_port(&config, &test_env()),
            DEFAULT_SLACK_LISTENER_PORT
        );
    }

    #[test]
    fn test_chat_not_requested_is_noop() {
        let config = chat_bot("");
        let modes = RunModes {
            cli: true,
            ..RunModes::default()
        };
        let outcome = configure_chat_application(&config, modes, &test_env());
        assert_eq!(outcome.run_modes, modes);
        assert!(outcome.disabled.is_empty());
        assert!(outcome.credentials.is_none());
    }
}
