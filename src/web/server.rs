use crate::initializer::AppContext;
use crate::web::router;
use hyper::Server;
use std::future::Future;
use std::net::SocketAddr;

/// Binds `ctx.config.bind_addr` and returns the bound address with the server
/// future, which resolves once `shutdown` completes and in-flight requests end.
pub fn bind(
    ctx: AppContext,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> hyper::Result<(SocketAddr, impl Future<Output = hyper::Result<()>> + Send)> {
    let addr = ctx.config.bind_addr;
    let app = router::build_router(ctx);

    let server = Server::try_bind(&addr)?.serve(app.into_make_service());
    let local_addr = server.local_addr();
    Ok((local_addr, server.with_graceful_shutdown(shutdown)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::testing::*;
    use crate::web::handlers::{Created, DataResponse};
    use serde_json::json;

    struct TestServer {
        t: TestDb,
        base: String,
        client: reqwest::Client,
        stop: Option<tokio::sync::oneshot::Sender<()>>,
    }

    impl TestServer {
        async fn start(t: TestDb) -> TestServer {
            let (tx, rx) = tokio::sync::oneshot::channel::<()>();
            let (addr, server) = bind(t.ctx.clone(), async move {
                rx.await.ok();
            })
            .unwrap();
            tokio::spawn(server);
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap();
            TestServer {
                t,
                base: format!("http://{}", addr),
                client,
                stop: Some(tx),
            }
        }

        async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
            self.client
                .post(format!("{}{}", self.base, path))
                .json(&body)
                .send()
                .await
                .unwrap()
        }

        async fn get(&self, path: &str) -> reqwest::Response {
            self.client
                .get(format!("{}{}", self.base, path))
                .send()
                .await
                .unwrap()
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(stop) = self.stop.take() {
                stop.send(()).ok();
            }
        }
    }

    #[tokio::test]
    async fn it_should_create_tweets() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;

        let resp = s
            .post(
                "/api/tweets",
                json!({"userId": alice.0, "content": "hello", "timestart": 1, "timeend": 2}),
            )
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: DataResponse<Vec<Created>> = resp.json().await.unwrap();
        assert_eq!(body.data.len(), 1);
        assert!(body.data[0].id > 0);

        let resp = s.get(&format!("/api/tweets/{}", body.data[0].id)).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let detail: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(detail["data"]["content"], "hello");
        assert_eq!(detail["data"]["authorName"], "alice");
        assert_eq!(detail["data"]["likeCount"], 0);
        assert_eq!(detail["data"]["viewerHasLiked"], false);
        assert_eq!(detail["data"]["timeWindow"], json!({"start": 1, "end": 2}));
    }

    #[tokio::test]
    async fn it_should_reject_invalid_tweets_without_inserting() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;

        for body in [
            json!({"userId": alice.0, "content": ""}),
            json!({"userId": alice.0, "content": "x".repeat(281)}),
            json!({"userId": alice.0}),
            json!({"userId": alice.0, "content": "hi", "replyToTweetId": 0}),
            json!("just a string"),
        ] {
            let resp = s.post("/api/tweets", body).await;
            assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
            let err: ErrorResponse = resp.json().await.unwrap();
            assert_eq!(err.error, "Invalid request");
        }
        assert_eq!(s.t.count_tweets().await, 0);
    }

    #[tokio::test]
    async fn it_should_reject_bodies_without_json_content_type() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;

        let resp = s
            .client
            .post(format!("{}/api/tweets", s.base))
            .body(json!({"userId": alice.0, "content": "hi"}).to_string())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error_type, "invalid_request");
        assert_eq!(s.t.count_tweets().await, 0);
    }

    #[tokio::test]
    async fn it_should_hide_store_failures() {
        let s = TestServer::start(TestDb::with_foreign_keys(true).await).await;
        let alice = s.t.user("alice").await;

        let resp = s
            .post(
                "/api/tweets",
                json!({"userId": alice.0, "content": "hi", "replyToTweetId": 4242}),
            )
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error, "Internal server error");
        assert!(!err.error.to_lowercase().contains("foreign"));
    }

    #[tokio::test]
    async fn it_should_accept_dangling_replies_on_a_lenient_store() {
        let s = TestServer::start(TestDb::with_foreign_keys(false).await).await;
        let alice = s.t.user("alice").await;

        let resp = s
            .post(
                "/api/tweets",
                json!({"userId": alice.0, "content": "hi", "replyToTweetId": 4242}),
            )
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_like_once() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;
        let bob = s.t.user("bob").await;
        let id = s.t.tweet(alice, "hi", None, at(0)).await;

        let body = json!({"userId": bob.0, "tweetId": id.value()});
        let resp = s.post("/api/likes", body.clone()).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let resp = s.post("/api/likes", body).await;
        assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);

        let resp = s.post("/api/likes", json!({"userId": bob.0})).await;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let detail: serde_json::Value = s
            .get(&format!("/api/tweets/{}?userid={}", id, bob.0))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(detail["data"]["likeCount"], 1);
        assert_eq!(detail["data"]["viewerHasLiked"], true);
    }

    #[tokio::test]
    async fn it_should_render_the_tweet_page() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;
        let bob = s.t.user("bob").await;
        let root = s.t.tweet(alice, "root", None, at(0)).await;
        let late = s.t.tweet(bob, "late", Some(root), at(30)).await;
        let early = s.t.tweet(bob, "early", Some(root), at(10)).await;
        s.t.like(bob, root).await;

        let resp = s
            .get(&format!("/tweets/{}?username=bob&userid={}", root, bob.0))
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let page: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(page["username"], "bob");
        assert_eq!(page["tweet"]["likeCount"], 1);
        assert_eq!(page["tweet"]["viewerHasLiked"], true);
        assert_eq!(page["replies"][0]["id"], early.value());
        assert_eq!(page["replies"][1]["id"], late.value());

        let replies: serde_json::Value = s
            .get(&format!("/api/tweets/{}/replies", root))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(replies["data"].as_array().map(|it| it.len()), Some(2));
    }

    #[tokio::test]
    async fn it_should_redirect_home_from_bad_tweet_pages() {
        let s = TestServer::start(TestDb::new().await).await;

        let resp = s.get("/tweets/abc?username=bob").await;
        assert_eq!(resp.status(), reqwest::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["location"], "/?username=bob");

        let resp = s.get("/tweets/999").await;
        assert_eq!(resp.status(), reqwest::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["location"], "/");

        let resp = s.get("/tweets/-3?username=a%20b").await;
        assert_eq!(resp.status(), reqwest::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["location"], "/?username=a+b");
    }

    #[tokio::test]
    async fn it_should_decode_percent_encoded_tweet_ids() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;
        let id = s.t.tweet(alice, "first", None, at(0)).await;
        assert_eq!(id.value(), 1);

        let resp = s.get("/tweets/%31").await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let page: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(page["tweet"]["content"], "first");

        let resp = s.get("/api/tweets/%31").await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_serve_the_home_timeline() {
        let s = TestServer::start(TestDb::new().await).await;
        let alice = s.t.user("alice").await;
        s.t.tweet(alice, "hi", None, at(0)).await;

        let resp = s.get("/?username=alice").await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let timeline: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(timeline["username"], "alice");
        assert_eq!(timeline["tweets"][0]["content"], "hi");
    }

    #[tokio::test]
    async fn it_should_answer_unknown_routes() {
        let s = TestServer::start(TestDb::new().await).await;

        assert_eq!(s.get("/nope").await.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(
            s.get("/api/tweets").await.status(),
            reqwest::StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            s.get("/api/tweets/abc").await.status(),
            reqwest::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            s.get("/api/tweets/404").await.status(),
            reqwest::StatusCode::NOT_FOUND
        );

        let resp = s.post("/tweets/1", json!({})).await;
        assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
        let err: ErrorResponse = resp.json().await.unwrap();
        assert_eq!(err.error_type, "method_not_allowed");

        let err: ErrorResponse = s.get("/nope").await.json().await.unwrap();
        assert_eq!(err.error_type, "route_not_found");
    }
}
