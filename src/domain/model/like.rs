use crate::domain::model::*;
use serde::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: LikeID,
    pub tweet_id: TweetID,
    pub user_id: UserID,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLike {
    pub tweet_id: TweetID,
    pub user_id: UserID,
}

/// Body of `POST /api/likes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLikeRequest {
    pub user_id: i32,
    pub tweet_id: TweetID,
}

impl From<CreateLikeRequest> for NewLike {
    fn from(req: CreateLikeRequest) -> NewLike {
        NewLike {
            tweet_id: req.tweet_id,
            user_id: UserID(req.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_parse_like_requests() {
        let req: CreateLikeRequest =
            serde_json::from_str(r#"{"userId": 3, "tweetId": 4}"#).unwrap();
        let like = NewLike::from(req);
        assert_eq!(like.user_id, UserID(3));
        assert_eq!(like.tweet_id.value(), 4);
    }

    #[test]
    fn it_should_reject_bad_like_requests() {
        for body in [
            r#"{"userId": 3}"#,
            r#"{"userId": 3, "tweetId": 0}"#,
            r#"{"userId": "x", "tweetId": 1}"#,
            "",
        ] {
            assert!(serde_json::from_str::<CreateLikeRequest>(body).is_err(), "{}", body);
        }
    }
}
