//! Fixtures shared by the unit tests: a throwaway SQLite file per test with
//! the schema applied and the whole app wired on top of it.

use crate::domain::model::*;
use crate::initializer::{self, AppContext, Config, Repository, Services};
use crate::schema::{tweets, users};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// `secs` seconds after a fixed instant.
pub fn at(secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|it| it.and_hms_opt(12, 0, 0))
        .unwrap()
        + chrono::Duration::seconds(secs)
}

pub struct TestDb {
    pub ctx: AppContext,
    pub repo: Repository,
    pub services: Services,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> TestDb {
        TestDb::with_foreign_keys(true).await
    }

    pub async fn with_foreign_keys(enforce_foreign_keys: bool) -> TestDb {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let ctx = initializer::new(Config {
            db_url: dir.path().join("test.db").to_string_lossy().into_owned(),
            db_pool_size: 2,
            enforce_foreign_keys,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            timeline_limit: 50,
        });
        ctx.infras.ensure_initialized().await.unwrap();
        TestDb {
            repo: ctx.repository.clone(),
            services: ctx.services.clone(),
            ctx,
            _dir: dir,
        }
    }

    pub async fn user(&self, name: &str) -> UserID {
        let id = self
            .ctx
            .infras
            .db
            .get_result::<i32, _>(
                diesel::insert_into(users::table)
                    .values(users::name.eq(name.to_string()))
                    .returning(users::id),
            )
            .await
            .unwrap();
        UserID(id)
    }

    pub async fn tweet(
        &self,
        user: UserID,
        content: &str,
        reply_to: Option<TweetID>,
        created_at: NaiveDateTime,
    ) -> TweetID {
        use crate::domain::interface::ITweetRepository;

        self.repo
            .tweet
            .insert(NewTweet {
                user_id: user,
                content: content.to_string(),
                timestart: None,
                timeend: None,
                reply_to_tweet_id: reply_to,
                created_at,
            })
            .await
            .unwrap()
    }

    pub async fn like(&self, user: UserID, tweet: TweetID) -> LikeID {
        use crate::domain::interface::ILikeRepository;

        self.repo
            .like
            .insert(NewLike {
                tweet_id: tweet,
                user_id: user,
            })
            .await
            .unwrap()
    }

    pub async fn count_tweets(&self) -> i64 {
        self.ctx
            .infras
            .db
            .get_result::<i64, _>(tweets::table.count())
            .await
            .unwrap()
    }
}
