//! Telegram Bot API client.

use async_trait::async_trait;
use azonbot_core::error::{AzonError, Result};
use azonbot_core::notify::Notifier;
use serde_json::json;

use crate::keyboard::ReplyKeyboardMarkup;
use crate::types::{ApiResponse, BotUser, Update};

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT_SECS: u64 = 10;

/// Stateless Bot API handle. Cheap to share behind an `Arc`; the onboarding
/// loop tracks its own getUpdates offset.
pub struct TelegramBot {
    token: String,
    client: reqwest::Client,
}

impl TelegramBot {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{API_BASE}/bot{}/{method}", self.token)
    }

    /// POST one Bot API method and unwrap the `ok`/`description` envelope.
    async fn call(&self, method: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(&body)
            .timeout(std::time::Duration::from_secs(SEND_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AzonError::Telegram(format!("{method} failed: {e}")))?;

        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| AzonError::Telegram(format!("invalid {method} response: {e}")))?;

        if !body.ok {
            return Err(AzonError::Telegram(format!(
                "{method} rejected: {}",
                body.description.unwrap_or_default()
            )));
        }
        Ok(body.result.unwrap_or_default())
    }

    /// Plain text message (conversation prompts).
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await?;
        Ok(())
    }

    /// Markdown-formatted message (notifications).
    pub async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            json!({ "chat_id": chat_id, "text": text, "parse_mode": "Markdown" }),
        )
        .await?;
        Ok(())
    }

    /// Markdown message with link previews suppressed (the mosque card).
    pub async fn send_card(&self, chat_id: i64, text: &str) -> Result<()> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown",
                "disable_web_page_preview": true,
            }),
        )
        .await?;
        Ok(())
    }

    /// Prompt with a reply keyboard.
    pub async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        markup: &ReplyKeyboardMarkup,
    ) -> Result<()> {
        self.call(
            "sendMessage",
            json!({ "chat_id": chat_id, "text": text, "reply_markup": markup }),
        )
        .await?;
        Ok(())
    }

    /// Bot identity — used as a startup credential check.
    pub async fn get_me(&self) -> Result<BotUser> {
        let result = self.call("getMe", json!({})).await?;
        serde_json::from_value(result)
            .map_err(|e| AzonError::Telegram(format!("invalid getMe payload: {e}")))
    }

    /// Long-poll for message updates after `offset`. The caller advances the
    /// offset past the highest `update_id` it has handled.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let response = self
            .client
            .get(self.api_url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
                ("allowed_updates", "[\"message\"]".into()),
            ])
            .timeout(std::time::Duration::from_secs(timeout_secs + SEND_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| AzonError::Telegram(format!("getUpdates failed: {e}")))?;

        let body: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .map_err(|e| AzonError::Telegram(format!("invalid getUpdates response: {e}")))?;

        if !body.ok {
            return Err(AzonError::Telegram(format!(
                "getUpdates rejected: {}",
                body.description.unwrap_or_default()
            )));
        }
        Ok(body.result.unwrap_or_default())
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_markdown(chat_id, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_embeds_token_and_method() {
        let bot = TelegramBot::new("123:abc");
        assert_eq!(
            bot.api_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }
}
