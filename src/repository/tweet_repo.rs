use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use crate::infra::DBConnector;
use crate::schema::tweets;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Integer, Nullable, Text, Timestamp};

#[derive(Queryable)]
pub struct TweetRecord {
    id: i32,
    user_id: i32,
    content: String,
    timestart: Option<i64>,
    timeend: Option<i64>,
    reply_to_tweet_id: Option<i32>,
    created_at: NaiveDateTime,
}

impl TweetRecord {
    pub fn to_model(self) -> Result<Tweet> {
        let reply_to_tweet_id = match self.reply_to_tweet_id {
            Some(id) => Some(tweet_id(id)?),
            None => None,
        };
        Ok(Tweet {
            id: tweet_id(self.id)?,
            user_id: UserID(self.user_id),
            content: self.content,
            time_window: TimeWindow::from_bounds(self.timestart, self.timeend),
            reply_to_tweet_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = tweets)]
pub struct NewTweetRecord {
    user_id: i32,
    content: String,
    timestart: Option<i64>,
    timeend: Option<i64>,
    reply_to_tweet_id: Option<i32>,
    created_at: NaiveDateTime,
}

impl NewTweetRecord {
    pub fn from_model(tweet: NewTweet) -> Self {
        NewTweetRecord {
            user_id: tweet.user_id.0,
            content: tweet.content,
            timestart: tweet.timestart,
            timeend: tweet.timeend,
            reply_to_tweet_id: tweet.reply_to_tweet_id.map(|it| it.value()),
            created_at: tweet.created_at,
        }
    }
}

/// Row shape of [`detail_query`].
#[derive(QueryableByName)]
pub struct TweetDetailRecord {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Text)]
    content: String,
    #[diesel(sql_type = Nullable<BigInt>)]
    timestart: Option<i64>,
    #[diesel(sql_type = Nullable<BigInt>)]
    timeend: Option<i64>,
    #[diesel(sql_type = Text)]
    author_name: String,
    #[diesel(sql_type = Integer)]
    author_id: i32,
    #[diesel(sql_type = BigInt)]
    like_count: i64,
    #[diesel(sql_type = Bool)]
    viewer_has_liked: bool,
    #[diesel(sql_type = Timestamp)]
    created_at: NaiveDateTime,
}

impl TweetDetailRecord {
    pub fn to_model(self) -> Result<TweetDetail> {
        Ok(TweetDetail {
            id: tweet_id(self.id)?,
            content: self.content,
            time_window: TimeWindow::from_bounds(self.timestart, self.timeend),
            author_name: self.author_name,
            author_id: UserID(self.author_id),
            like_count: self.like_count,
            viewer_has_liked: self.viewer_has_liked,
            created_at: self.created_at,
        })
    }
}

fn tweet_id(id: i32) -> Result<TweetID> {
    TweetID::new(id).map_err(|err| ServiceError::new(RepositoryError::InvalidRecord, err))
}

// like_counts: likes grouped per tweet.
// viewer_likes: constant marker per tweet the viewer liked. Grouped so that
// duplicate like rows can never fan out the outer join.
// Both are left joined so tweets without likes still come back with 0 / false.
// The first bind parameter is always the viewer id.
const DETAIL_SELECT: &str = r#"
WITH like_counts AS (
    SELECT likes.tweet_id AS tweet_id, COUNT(*) AS like_count
    FROM likes
    GROUP BY likes.tweet_id
),
viewer_likes AS (
    SELECT likes.tweet_id AS tweet_id, 1 AS liked
    FROM likes
    WHERE likes.user_id = ?
    GROUP BY likes.tweet_id
)
SELECT
    tweets.id AS id,
    tweets.content AS content,
    tweets.timestart AS timestart,
    tweets.timeend AS timeend,
    users.name AS author_name,
    users.id AS author_id,
    COALESCE(like_counts.like_count, 0) AS like_count,
    COALESCE(viewer_likes.liked, 0) AS viewer_has_liked,
    tweets.created_at AS created_at
FROM tweets
INNER JOIN users ON users.id = tweets.user_id
LEFT JOIN like_counts ON like_counts.tweet_id = tweets.id
LEFT JOIN viewer_likes ON viewer_likes.tweet_id = tweets.id
"#;

fn detail_query(filter: &str, order: &str) -> String {
    format!("{}WHERE {}\n{}", DETAIL_SELECT, filter, order)
}

pub struct TweetRepository {
    db: DBConnector,
}

impl TweetRepository {
    pub fn new(db: DBConnector) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ITweetRepository for TweetRepository {
    async fn find_by_id(&self, id: TweetID) -> Result<Tweet> {
        let record = self
            .db
            .first::<TweetRecord, _>(tweets::table.filter(tweets::id.eq(id.value())))
            .await?;
        record.to_model()
    }

    async fn insert(&self, tweet: NewTweet) -> Result<TweetID> {
        let record = NewTweetRecord::from_model(tweet);
        let id = self
            .db
            .get_result::<i32, _>(
                diesel::insert_into(tweets::table)
                    .values(record)
                    .returning(tweets::id),
            )
            .await?;
        tweet_id(id)
    }

    async fn find_detail(&self, id: TweetID, viewer: UserID) -> Result<TweetDetail> {
        let query = diesel::sql_query(detail_query("tweets.id = ?", ""))
            .bind::<Integer, _>(viewer.0)
            .bind::<Integer, _>(id.value());
        let records = self.db.load::<TweetDetailRecord, _>(query).await?;
        match records.into_iter().next() {
            Some(record) => record.to_model(),
            None => Err(ServiceError::new(
                RepositoryError::RecordNotFound,
                anyhow::anyhow!("tweet {} or its author does not exist", id),
            )),
        }
    }

    async fn find_replies(&self, id: TweetID, viewer: UserID) -> Result<Vec<TweetDetail>> {
        let query = diesel::sql_query(detail_query(
            "tweets.reply_to_tweet_id = ?",
            "ORDER BY tweets.created_at ASC, tweets.id ASC",
        ))
        .bind::<Integer, _>(viewer.0)
        .bind::<Integer, _>(id.value());
        let records = self.db.load::<TweetDetailRecord, _>(query).await?;
        records
            .into_iter()
            .map(|record| record.to_model())
            .collect::<Result<Vec<TweetDetail>>>()
    }

    async fn find_timeline(&self, viewer: UserID, limit: i64) -> Result<Vec<TweetDetail>> {
        let query = diesel::sql_query(detail_query(
            "tweets.reply_to_tweet_id IS NULL",
            "ORDER BY tweets.created_at DESC, tweets.id DESC\nLIMIT ?",
        ))
        .bind::<Integer, _>(viewer.0)
        .bind::<BigInt, _>(limit);
        let records = self.db.load::<TweetDetailRecord, _>(query).await?;
        records
            .into_iter()
            .map(|record| record.to_model())
            .collect::<Result<Vec<TweetDetail>>>()
    }
}
