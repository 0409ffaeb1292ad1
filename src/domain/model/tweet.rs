use crate::domain::model::*;
use crate::error::*;
use chrono::NaiveDateTime;
use serde::*;

pub const CONTENT_MAX_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    pub fn from_bounds(start: Option<i64>, end: Option<i64>) -> Option<TimeWindow> {
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(TimeWindow { start, end })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: TweetID,
    pub user_id: UserID,
    pub content: String,
    pub time_window: Option<TimeWindow>,
    pub reply_to_tweet_id: Option<TweetID>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTweet {
    pub user_id: UserID,
    pub content: String,
    pub timestart: Option<i64>,
    pub timeend: Option<i64>,
    pub reply_to_tweet_id: Option<TweetID>,
    pub created_at: NaiveDateTime,
}

/// A tweet joined with its author and like aggregates, as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetDetail {
    pub id: TweetID,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    pub author_name: String,
    pub author_id: UserID,
    pub like_count: i64,
    pub viewer_has_liked: bool,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /api/tweets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTweetRequest {
    pub user_id: i32,
    pub content: String,
    pub timestart: Option<i64>,
    pub timeend: Option<i64>,
    pub reply_to_tweet_id: Option<TweetID>,
}

impl CreateTweetRequest {
    pub fn validate(self, created_at: NaiveDateTime) -> Result<NewTweet> {
        let len = self.content.chars().count();
        if len == 0 || len > CONTENT_MAX_CHARS {
            return Err(GeneralError::invalid_request(anyhow::anyhow!(
                "content must be 1..={} characters, got {}",
                CONTENT_MAX_CHARS,
                len
            )));
        }

        Ok(NewTweet {
            user_id: UserID(self.user_id),
            content: self.content,
            timestart: self.timestart,
            timeend: self.timeend,
            reply_to_tweet_id: self.reply_to_tweet_id,
            created_at,
        })
    }
}
