use crate::domain::model::*;
use serde::*;

/// View model of the tweet-detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub viewer_id: UserID,
    pub tweet: TweetDetail,
    pub replies: Vec<TweetDetail>,
}

/// View model of the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub viewer_id: UserID,
    pub tweets: Vec<TweetDetail>,
}
