use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use std::sync::Arc;

#[derive(Debug)]
pub enum PageError {
    InvalidTweetID,
}

impl IServiceError for PageError {
    fn error_type(&self) -> String {
        use PageError::*;

        match self {
            InvalidTweetID => "invalid_tweet_id",
        }
        .to_string()
    }

    fn status_code(&self) -> http::StatusCode {
        use PageError::*;

        match self {
            InvalidTweetID => http::StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        "Invalid request".to_string()
    }
}

/// Builds the view models the page routes render.
#[derive(Clone)]
pub struct PageService {
    tweet_repo: Arc<dyn ITweetRepository + Send + Sync>,
    like_repo: Arc<dyn ILikeRepository + Send + Sync>,
    user_repo: Arc<dyn IUserRepository + Send + Sync>,
    timeline_limit: i64,
}

impl PageService {
    pub fn new(
        tweet_repo: Arc<dyn ITweetRepository + Send + Sync>,
        like_repo: Arc<dyn ILikeRepository + Send + Sync>,
        user_repo: Arc<dyn IUserRepository + Send + Sync>,
        timeline_limit: i64,
    ) -> Self {
        Self {
            tweet_repo,
            like_repo,
            user_repo,
            timeline_limit,
        }
    }

    /// Tweet-detail page. One query per step, in order; the first missing row
    /// ends the assembly with `RecordNotFound`.
    ///
    /// The like count is the number of like rows fetched, not a `COUNT(*)`.
    pub async fn tweet_page(
        &self,
        raw_id: &str,
        username: Option<String>,
        viewer: UserID,
    ) -> Result<TweetPage> {
        let id: TweetID = raw_id
            .parse()
            .map_err(|err| ServiceError::new(PageError::InvalidTweetID, err))?;

        let tweet = self.tweet_repo.find_by_id(id).await?;
        let likes = self.like_repo.find_by_tweet(id).await?;
        let viewer_like = self.like_repo.find_by_user(id, viewer).await?;
        let author = self.user_repo.find_by_id(tweet.user_id).await?;
        let replies = self.tweet_repo.find_replies(id, viewer).await?;

        Ok(TweetPage {
            username,
            viewer_id: viewer,
            tweet: TweetDetail {
                id: tweet.id,
                content: tweet.content,
                time_window: tweet.time_window,
                author_name: author.name,
                author_id: author.id,
                like_count: likes.len() as i64,
                viewer_has_liked: viewer_like.is_some(),
                created_at: tweet.created_at,
            },
            replies,
        })
    }

    pub async fn timeline(&self, username: Option<String>, viewer: UserID) -> Result<Timeline> {
        let tweets = self
            .tweet_repo
            .find_timeline(viewer, self.timeline_limit)
            .await?;
        Ok(Timeline {
            username,
            viewer_id: viewer,
            tweets,
        })
    }
}

/// Page errors that send the visitor back home instead of failing the request.
pub fn is_redirect_error(err: &ServiceError) -> bool {
    err.is_error_of(PageError::InvalidTweetID) || err.is_error_of(RepositoryError::RecordNotFound)
}
