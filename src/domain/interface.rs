use crate::domain::model::*;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ITweetRepository {
    async fn find_by_id(&self, id: TweetID) -> Result<Tweet>;
    async fn insert(&self, tweet: NewTweet) -> Result<TweetID>;
    /// One tweet with its author and like aggregates for `viewer`.
    async fn find_detail(&self, id: TweetID, viewer: UserID) -> Result<TweetDetail>;
    /// Direct replies of `id`, oldest first.
    async fn find_replies(&self, id: TweetID, viewer: UserID) -> Result<Vec<TweetDetail>>;
    /// Top-level tweets, newest first.
    async fn find_timeline(&self, viewer: UserID, limit: i64) -> Result<Vec<TweetDetail>>;
}

#[async_trait]
pub trait ILikeRepository {
    async fn find_by_tweet(&self, tweet_id: TweetID) -> Result<Vec<Like>>;
    async fn find_by_user(&self, tweet_id: TweetID, user_id: UserID) -> Result<Option<Like>>;
    async fn insert(&self, like: NewLike) -> Result<LikeID>;
}

#[async_trait]
pub trait IUserRepository {
    async fn find_by_id(&self, id: UserID) -> Result<User>;
}
