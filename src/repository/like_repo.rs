use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use crate::infra::DBConnector;
use crate::schema::likes;
use async_trait::async_trait;
use diesel::prelude::*;

#[derive(Queryable)]
pub struct LikeRecord {
    id: i32,
    tweet_id: i32,
    user_id: i32,
}

impl LikeRecord {
    pub fn to_model(self) -> Result<Like> {
        Ok(Like {
            id: LikeID(self.id),
            tweet_id: TweetID::new(self.tweet_id)
                .map_err(|err| ServiceError::new(RepositoryError::InvalidRecord, err))?,
            user_id: UserID(self.user_id),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = likes)]
pub struct NewLikeRecord {
    tweet_id: i32,
    user_id: i32,
}

pub struct LikeRepository {
    db: DBConnector,
}

impl LikeRepository {
    pub fn new(db: DBConnector) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ILikeRepository for LikeRepository {
    async fn find_by_tweet(&self, tweet_id: TweetID) -> Result<Vec<Like>> {
        let records = self
            .db
            .load::<LikeRecord, _>(likes::table.filter(likes::tweet_id.eq(tweet_id.value())))
            .await?;
        records
            .into_iter()
            .map(|record| record.to_model())
            .collect::<Result<Vec<Like>>>()
    }

    async fn find_by_user(&self, tweet_id: TweetID, user_id: UserID) -> Result<Option<Like>> {
        let record = self
            .db
            .first_optional::<LikeRecord, _>(
                likes::table
                    .filter(likes::tweet_id.eq(tweet_id.value()))
                    .filter(likes::user_id.eq(user_id.0)),
            )
            .await?;
        record.map(|record| record.to_model()).transpose()
    }

    async fn insert(&self, like: NewLike) -> Result<LikeID> {
        let record = NewLikeRecord {
            tweet_id: like.tweet_id.value(),
            user_id: like.user_id.0,
        };
        let id = self
            .db
            .get_result::<i32, _>(
                diesel::insert_into(likes::table)
                    .values(record)
                    .returning(likes::id),
            )
            .await?;
        Ok(LikeID(id))
    }
}
