//! Feed reader: locates the newest post in the weekly RSS feed.
//!
//! Only one value is consumed from the feed document: the text of the first
//! `item/link` node in document order. The feed is assumed to list entries
//! newest-first; that ordering is the publisher's contract and is not
//! verified here.

use crate::fetch::{self, FetchError};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument};

/// Fetch the feed and return the URL of its newest post.
///
/// Returns `Ok(None)` when the feed lists no items, which is not an error;
/// the caller is expected to end the run quietly.
#[instrument(level = "info", skip(client))]
pub async fn latest_post_url(
    client: &reqwest::Client,
    feed_url: &str,
) -> Result<Option<String>, FetchError> {
    let xml = fetch::fetch_text(client, feed_url).await?;
    first_item_link(&xml)
}

/// Extract the first `item/link` text from an RSS document.
///
/// Walks the XML as a stream of events, tracking `<item>`/`<link>` nesting;
/// the first non-empty link text wins. Malformed XML is a
/// [`FetchError::Parse`].
pub fn first_item_link(xml: &str) -> Result<Option<String>, FetchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_item = false;
    let mut in_link = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"item" => in_item = true,
            Ok(Event::Start(e)) if in_item && e.name().as_ref() == b"link" => in_link = true,
            Ok(Event::Text(e)) if in_link => {
                let link = e
                    .xml_content()
                    .map_err(|e| FetchError::Parse(e.to_string()))?
                    .trim()
                    .to_string();
                if !link.is_empty() {
                    debug!(%link, "Found first feed item link");
                    return Ok(Some(link));
                }
            }
            Ok(Event::CData(e)) if in_link => {
                let link = String::from_utf8_lossy(&e).trim().to_string();
                if !link.is_empty() {
                    debug!(%link, "Found first feed item link");
                    return Ok(Some(link));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"link" => in_link = false,
            Ok(Event::End(e)) if e.name().as_ref() == b"item" => in_item = false,
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(FetchError::Parse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
}
