use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct LikeService {
    like_repo: Arc<dyn ILikeRepository + Send + Sync>,
}

impl LikeService {
    pub fn new(like_repo: Arc<dyn ILikeRepository + Send + Sync>) -> Self {
        Self { like_repo }
    }

    /// One like per (user, tweet). The unique index catches the race the
    /// lookup cannot.
    pub async fn create(&self, like: NewLike) -> Result<LikeID> {
        if let Some(existing) = self.like_repo.find_by_user(like.tweet_id, like.user_id).await? {
            return Err(ServiceError::new(
                RepositoryError::DuplicateRecord,
                anyhow::anyhow!(
                    "user {} already liked tweet {} (like {})",
                    like.user_id.0,
                    like.tweet_id,
                    existing.id.0
                ),
            ));
        }
        self.like_repo.insert(like).await
    }
}
