//! Request and response bodies exchanged with Eurocore.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelegramType {
    Standard,
}

/// One queued telegram, as Eurocore expects it.
///
/// `id` is the numeric telegram template id, sent as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTelegram {
    pub sender: String,
    pub id: String,
    pub secret_key: String,
    pub recipient: String,
    pub tg_type: TelegramType,
}

/// A telegram template stored in Eurocore.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    /// Nation the telegram is sent from
    pub nation: String,
    pub tgid: u64,
    pub key: String,
}
