//! # twig_telegram
//!
//! Forwards the newest "This Week in GNOME" post to a Telegram chat.
//!
//! ## Pipeline
//!
//! One run is a single sequential pass:
//! 1. **Feed**: fetch the weekly RSS feed and take the first item's link
//! 2. **Fetch**: download the post's HTML
//! 3. **Extract**: pull title, section headers, and image URLs out of the
//!    fixed post template
//! 4. **Format**: render the configured MarkdownV2 layout (outline or
//!    caption)
//! 5. **Dispatch**: send text and images through the Telegram Bot API
//!
//! A transport or parse failure at the feed or post stage ends the run
//! with a logged diagnostic; dispatch failures are logged per call and
//! never abort sibling sends. Scheduling is external (cron or a systemd
//! timer) — the process does one run and exits.
//!
//! ## Usage
//!
//! ```sh
//! BOT_TOKEN=123:abc CHAT_ID=@gnomebrasil twig_telegram
//! ```

use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod feed;
mod fetch;
mod format;
mod models;
mod scrapers;
mod telegram;

use cli::Cli;
use fetch::FetchError;
use format::MessagePolicy;
use telegram::TelegramClient;

#[tokio::main]
#[instrument]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("twig_telegram starting up");

    // Parse CLI; missing credentials abort here, before any network call.
    let args = Cli::parse();
    debug!(feed_url = %args.feed_url, policy = ?args.policy, "Parsed CLI arguments");

    // Run-scoped failures are logged and end the run cleanly; the only
    // nonzero exit is the argument-parsing abort above.
    if let Err(e) = run(args).await {
        error!(error = %e, "Run aborted");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
}

async fn run(args: Cli) -> Result<(), FetchError> {
    let client = reqwest::Client::new();

    // ---- Locate the newest post ----
    let Some(post_url) = feed::latest_post_url(&client, &args.feed_url).await? else {
        warn!(feed_url = %args.feed_url, "Feed lists no posts; nothing to send");
        return Ok(());
    };
    info!(%post_url, "Found latest post");

    let post_url = Url::parse(&post_url).map_err(|e| FetchError::Parse(e.to_string()))?;

    // ---- Fetch and extract ----
    let html = fetch::fetch_text(&client, post_url.as_str()).await?;
    let post = scrapers::thisweek::extract_post(&html, &post_url);
    info!(
        title = %post.title,
        headers = post.headers.len(),
        images = post.images.len(),
        "Extracted post content"
    );

    // ---- Format and dispatch (best-effort from here on) ----
    let telegram = TelegramClient::new(client, &args.bot_token, &args.chat_id);
    match args.policy {
        MessagePolicy::Outline => {
            let text = format::outline_message(&post, &post_url);
            debug!(chars = text.chars().count(), "Formatted outline message");
            telegram.send_text(&text).await;
            if let Err(e) = telegram.send_media_group(&post.images, None).await {
                error!(error = %e, "Failed to send media group");
            }
        }
        MessagePolicy::Caption => {
            let caption = format::caption_message(&post, &post_url);
            debug!(chars = caption.chars().count(), "Formatted caption message");
            if post.images.is_empty() {
                // Nothing to hang the caption on; send it as plain text so
                // the run still delivers something.
                telegram.send_text(&caption).await;
            } else if let Err(e) = telegram.send_media_group(&post.images, Some(&caption)).await {
                error!(error = %e, "Failed to send media group");
            }
        }
    }

    Ok(())
}
