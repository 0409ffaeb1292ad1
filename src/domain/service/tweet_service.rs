use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct TweetService {
    tweet_repo: Arc<dyn ITweetRepository + Send + Sync>,
}

impl TweetService {
    pub fn new(tweet_repo: Arc<dyn ITweetRepository + Send + Sync>) -> Self {
        Self { tweet_repo }
    }

    /// Validates and stores one tweet. Identical requests create identical rows.
    pub async fn create(&self, req: CreateTweetRequest) -> Result<TweetID> {
        let tweet = req.validate(chrono::Utc::now().naive_utc())?;
        let id = self.tweet_repo.insert(tweet).await?;
        Ok(id)
    }

    pub async fn detail(&self, id: TweetID, viewer: UserID) -> Result<TweetDetail> {
        self.tweet_repo.find_detail(id, viewer).await
    }

    pub async fn replies(&self, id: TweetID, viewer: UserID) -> Result<Vec<TweetDetail>> {
        self.tweet_repo.find_replies(id, viewer).await
    }
}
