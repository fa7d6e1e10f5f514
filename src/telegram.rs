//! Telegram Bot API dispatcher.
//!
//! Sends the formatted text and the post's images to the destination chat
//! via `sendMessage` and `sendMediaGroup`. The client owns the bot
//! credential and chat id as explicit values, never ambient lookups.
//!
//! Dispatch is best-effort: a failed call is logged with the API's
//! response and does not abort sibling sends. The platform limits encoded
//! here are Telegram's documented ones — 4096 characters per message
//! (chunked at 4000 for headroom) and 10 photos per media group.

use crate::fetch::FetchError;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

/// Maximum characters sent per `sendMessage` call; longer text is split.
pub const MESSAGE_CHUNK_LIMIT: usize = 4000;

/// Maximum photos in one `sendMediaGroup` call; excess images are dropped.
pub const MAX_IMAGES_PER_BATCH: usize = 10;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const PARSE_MODE: &str = "MarkdownV2";

/// Client for the two Bot API calls this pipeline makes.
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Serialize)]
struct InputMediaPhoto<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

#[derive(Serialize)]
struct SendMediaGroup<'a> {
    chat_id: &'a str,
    media: Vec<InputMediaPhoto<'a>>,
}

impl TelegramClient {
    pub fn new(
        http: reqwest::Client,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: TELEGRAM_API_BASE.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    #[cfg(test)]
    fn with_api_base(http: reqwest::Client, api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            http,
            api_base: api_base.to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Send text to the chat, splitting it into fixed-width chunks when it
    /// exceeds [`MESSAGE_CHUNK_LIMIT`].
    ///
    /// Chunks are sent in order; a failed chunk is logged and does not
    /// abort the remaining ones.
    #[instrument(level = "info", skip_all, fields(chars = text.chars().count()))]
    pub async fn send_text(&self, text: &str) {
        let chunks = chunk_text(text, MESSAGE_CHUNK_LIMIT);
        if chunks.len() > 1 {
            info!(chunks = chunks.len(), "Text exceeds the per-call limit; splitting");
        }
        for (index, chunk) in chunks.iter().enumerate() {
            match self.send_message(chunk).await {
                Ok(()) => debug!(chunk = index, "Sent message chunk"),
                Err(e) => error!(chunk = index, error = %e, "Failed to send message chunk"),
            }
        }
    }

    async fn send_message(&self, text: &str) -> Result<(), FetchError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: PARSE_MODE,
            disable_web_page_preview: true,
        };
        self.post("sendMessage", &payload).await
    }

    /// Send the post's images as one media group.
    ///
    /// At most [`MAX_IMAGES_PER_BATCH`] images are sent; excess images are
    /// dropped with a warning. The caption, when given, is attached to the
    /// first photo only. An empty image list is a no-op.
    #[instrument(level = "info", skip_all, fields(images = image_urls.len()))]
    pub async fn send_media_group(
        &self,
        image_urls: &[String],
        caption: Option<&str>,
    ) -> Result<(), FetchError> {
        if image_urls.is_empty() {
            info!("No images to send");
            return Ok(());
        }
        if image_urls.len() > MAX_IMAGES_PER_BATCH {
            warn!(
                dropped = image_urls.len() - MAX_IMAGES_PER_BATCH,
                "Post has more images than fit in one media group; dropping the excess"
            );
        }

        let media: Vec<InputMediaPhoto<'_>> = image_urls
            .iter()
            .take(MAX_IMAGES_PER_BATCH)
            .enumerate()
            .map(|(index, url)| InputMediaPhoto {
                kind: "photo",
                media: url,
                caption: if index == 0 { caption } else { None },
                parse_mode: if index == 0 && caption.is_some() {
                    Some(PARSE_MODE)
                } else {
                    None
                },
            })
            .collect();

        let payload = SendMediaGroup {
            chat_id: &self.chat_id,
            media,
        };
        self.post("sendMediaGroup", &payload).await
    }

    async fn post<T: Serialize>(&self, api_method: &str, payload: &T) -> Result<(), FetchError> {
        // The URL embeds the bot token; keep it out of the logs.
        let url = format!("{}/bot{}/{}", self.api_base, self.token, api_method);
        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                method = api_method,
                status = status.as_u16(),
                body = %truncate_for_log(&body, 300),
                "Telegram API rejected the call"
            );
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        info!(method = api_method, "Telegram API call succeeded");
        Ok(())
    }
}

/// Split text into ordered fixed-width chunks of at most `limit` characters.
///
/// Splitting is character-based, not word-aware; concatenating the chunks
/// reproduces the input exactly.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
        None => s.to_string(),
    }
}
