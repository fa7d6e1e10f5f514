//! Command-line interface definitions.
//!
//! All options can be supplied as flags or environment variables. The bot
//! credential and destination chat are required: when either is missing,
//! argument parsing aborts the process before any network call is made.

use crate::format::MessagePolicy;
use clap::Parser;

/// Command-line arguments for the weekly-post forwarder.
///
/// # Examples
///
/// ```sh
/// # Usual deployment: credentials from the environment
/// BOT_TOKEN=123:abc CHAT_ID=@gnomebrasil twig_telegram
///
/// # Staging run against a test feed, caption layout
/// twig_telegram --feed-url https://staging.example.org/index.xml --policy caption
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Telegram bot token used to authenticate against the Bot API
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Identifier of the chat that receives the weekly post
    #[arg(long, env = "CHAT_ID")]
    pub chat_id: String,

    /// RSS feed listing the weekly posts, newest first
    #[arg(
        long,
        env = "FEED_URL",
        default_value = "https://thisweek.gnome.org/index.xml"
    )]
    pub feed_url: String,

    /// Message layout sent to the chat
    #[arg(long, env = "MESSAGE_POLICY", value_enum, default_value = "outline")]
    pub policy: MessagePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&[
            "twig_telegram",
            "--bot-token",
            "123:abc",
            "--chat-id",
            "@gnomebrasil",
        ]);

        assert_eq!(cli.bot_token, "123:abc");
        assert_eq!(cli.chat_id, "@gnomebrasil");
        assert_eq!(cli.feed_url, "https://thisweek.gnome.org/index.xml");
        assert_eq!(cli.policy, MessagePolicy::Outline);
    }

    #[test]
    fn test_cli_policy_override() {
        let cli = Cli::parse_from(&[
            "twig_telegram",
            "--bot-token",
            "123:abc",
            "--chat-id",
            "@gnomebrasil",
            "--policy",
            "caption",
        ]);

        assert_eq!(cli.policy, MessagePolicy::Caption);
    }
}
