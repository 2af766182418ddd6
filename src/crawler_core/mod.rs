//! Crawler Core - Feed Boundary and Crawl Loop
//!
//! Drives one bounded crawl: fetch posts from the feed client boundary,
//! extract mentions from every title, body, and comment body, and close
//! the run into a session result. Storage stays outside this module.

pub mod crawler;
pub mod feed;

pub use crawler::{CrawlError, CrawlProgress, Crawler};
pub use feed::{Comment, FeedClient, FeedError, Post};
