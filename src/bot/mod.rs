//! Telegram transport: command dispatch over long polling.
//!
//! The transport owns nothing but I/O: it receives messages, routes
//! commands, calls the lookup core against a store snapshot, and renders
//! the structured payloads to Markdown.

mod api;
mod render;

pub use api::{BotApi, BotError, BotProfile};

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::lookup;
use crate::store::SharedStore;

/// Pause before retrying after a failed poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

enum Command {
    Start,
    Help,
    List,
    Reload,
    Unknown,
    /// Command addressed to a different bot in a group chat.
    Ignore,
}

/// The running bot: API client plus the shared record store.
pub struct Bot {
    api: BotApi,
    store: Arc<SharedStore>,
    config: Config,
    username: Option<String>,
}

impl Bot {
    /// Build the client and verify the token against `getMe`.
    pub async fn new(
        config: Config,
        token: &str,
        store: Arc<SharedStore>,
    ) -> Result<Self, BotError> {
        let api = BotApi::new(
            &config.telegram.api_base,
            token,
            Duration::from_secs(config.telegram.request_timeout),
        )?;

        let profile = api.get_me().await?;
        info!(
            username = profile.username.as_deref().unwrap_or("<unset>"),
            "authenticated with Telegram"
        );

        Ok(Self {
            api,
            store,
            config,
            username: profile.username,
        })
    }

    /// Poll for updates until the process is stopped.
    pub async fn run(self) -> anyhow::Result<()> {
        let mut offset = 0i64;

        loop {
            let updates = match self
                .api
                .get_updates(offset, self.config.telegram.poll_timeout)
                .await
            {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("Failed to poll for updates: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text.as_deref() else {
                    continue;
                };

                for reply in self.replies_for(text).await {
                    if let Err(e) = self.api.send_message(message.chat.id, &reply).await {
                        error!(chat_id = message.chat.id, "Failed to send reply: {}", e);
                    }
                }
            }
        }
    }

    async fn replies_for(&self, text: &str) -> Vec<String> {
        match self.parse_command(text) {
            Some(Command::Start) => vec![render::START_TEXT.to_string()],
            Some(Command::Help) => vec![render::HELP_TEXT.to_string()],
            Some(Command::Unknown) => vec![render::UNKNOWN_COMMAND_TEXT.to_string()],
            Some(Command::Ignore) => Vec::new(),
            Some(Command::List) => {
                let snapshot = self.store.snapshot().await;
                render::render_list(&snapshot.all_display_names())
            }
            Some(Command::Reload) => vec![self.reload().await],
            None => {
                let snapshot = self.store.snapshot().await;
                vec![render::render(&lookup::resolve(&snapshot, text))]
            }
        }
    }

    /// Rebuild the record table from the data file. A failure leaves the
    /// previous table live and reports the cause.
    async fn reload(&self) -> String {
        let source = self.config.open_source();
        match self
            .store
            .reload(source.as_ref(), &self.config.partitions)
            .await
        {
            Ok(summary) => format!(
                "✅ *Data reloaded:* {} records across {} partitions",
                summary.records, summary.partitions
            ),
            Err(e) => {
                error!("Reload failed: {}", e);
                format!(
                    "❌ *Reload failed:* {}\nThe previous data set is still active.",
                    e
                )
            }
        }
    }

    fn parse_command(&self, text: &str) -> Option<Command> {
        let rest = text.trim().strip_prefix('/')?;
        let token = rest.split_whitespace().next().unwrap_or("");

        let name = match token.split_once('@') {
            Some((name, target)) => {
                let addressed_to_us = self
                    .username
                    .as_deref()
                    .is_some_and(|me| me.eq_ignore_ascii_case(target));
                if !addressed_to_us {
                    return Some(Command::Ignore);
                }
                name
            }
            None => token,
        };

        Some(match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "list" => Command::List,
            "reload" => Command::Reload,
            _ => Command::Unknown,
        })
    }
}
