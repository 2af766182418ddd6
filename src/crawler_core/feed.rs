//! Feed client boundary
//!
//! The social-media API client lives outside the core; an adapter
//! implements this trait and owns credentials, rate limits, and timeouts.

use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub body: String,
}

#[derive(Debug)]
pub enum FeedError {
    Connection(String),
    Api(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Connection(msg) => write!(f, "Feed connection failed: {}", msg),
            FeedError::Api(msg) => write!(f, "Feed API error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch up to `limit` posts from the named feed.
    async fn fetch_posts(&self, feed: &str, limit: usize) -> Result<Vec<Post>, FeedError>;

    /// Fetch up to `limit` comments for one post.
    async fn fetch_comments(&self, post_id: &str, limit: usize)
        -> Result<Vec<Comment>, FeedError>;
}
