//! Per-source content extractors.
//!
//! Each submodule knows the fixed HTML template of one post source and
//! turns a fetched document into a [`crate::models::PostContent`]. The
//! selector paths inside a scraper are deliberately coupled to that one
//! template; everything downstream (formatting, dispatch) only sees the
//! extracted record.
//!
//! # Extraction contract
//!
//! - `extract_post(html, post_url)` never fails: missing optional structure
//!   produces defaults (placeholder title, empty header/image lists).
//! - All returned image URLs are absolute, resolved against the post URL.
//!
//! Supporting another source means adding a sibling module with the same
//! contract and different selector paths.

pub mod thisweek;
