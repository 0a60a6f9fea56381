//! Handing the eligible nations over to the telegram gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use eurocore_client::{EurocoreClient, NewTelegram, TelegramType};
use store::NationName;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Where the sender, template id and secret key come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramSource {
    /// Values given directly in the configuration
    Explicit { author: String, id: u64, key: String },
    /// A template stored in Eurocore, looked up by id
    Template(String),
}

/// Resolved sender details shared by every telegram of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramSender {
    pub author: String,
    pub id: u64,
    pub key: String,
}

/// One telegram per recipient, in recipient order.
pub fn build_telegrams(sender: &TelegramSender, recipients: &[NationName]) -> Vec<NewTelegram> {
    recipients
        .iter()
        .map(|recipient| NewTelegram {
            sender: sender.author.clone(),
            id: sender.id.to_string(),
            secret_key: sender.key.clone(),
            recipient: recipient.to_string(),
            tg_type: TelegramType::Standard,
        })
        .collect()
}

/// Batch submission of telegrams.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Turn the configured source into concrete sender details.
    async fn resolve_sender(&self, source: &TelegramSource) -> Result<TelegramSender>;

    /// Submit the whole batch in one attempt. Returns the HTTP status.
    async fn send(&self, telegrams: &[NewTelegram]) -> Result<u16>;
}

/// Dispatcher backed by Eurocore.
///
/// Logs in at most once per run; the token is reused for the template
/// lookup and the submission.
pub struct EurocoreDispatcher {
    client: EurocoreClient,
    token: OnceCell<String>,
}

impl EurocoreDispatcher {
    pub fn new(client: EurocoreClient) -> Self {
        Self {
            client,
            token: OnceCell::new(),
        }
    }

    async fn token(&self) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                debug!("Authenticating with Eurocore at {}", self.client.base_url());
                self.client.login().await
            })
            .await
            .context("Eurocore login failed")?;
        Ok(token.as_str())
    }
}

#[async_trait]
impl Dispatcher for EurocoreDispatcher {
    async fn resolve_sender(&self, source: &TelegramSource) -> Result<TelegramSender> {
        match source {
            TelegramSource::Explicit { author, id, key } => Ok(TelegramSender {
                author: author.clone(),
                id: *id,
                key: key.clone(),
            }),
            TelegramSource::Template(template_id) => {
                let token = self.token().await?;
                let template = self
                    .client
                    .template(token, template_id)
                    .await
                    .with_context(|| format!("Unable to retrieve telegram template {template_id}"))?;
                info!("Using template {} from {}", template_id, template.nation);
                Ok(TelegramSender {
                    author: template.nation,
                    id: template.tgid,
                    key: template.key,
                })
            }
        }
    }

    async fn send(&self, telegrams: &[NewTelegram]) -> Result<u16> {
        let token = self.token().await?;
        let status = self.client.send_telegrams(token, telegrams).await?;
        Ok(status)
    }
}
