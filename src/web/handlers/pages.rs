use crate::domain::service::is_redirect_error;
use crate::error::*;
use crate::initializer::AppContext;
use crate::web::handlers::viewer_query;
use crate::web::params::{home_location, ViewerQuery};
use crate::wrapper::response;
use axum::extract::{Path, Query, State};
use axum::response::Response;

/// `GET /tweets/{id}?username=&userid=`
///
/// Bad ids, missing tweets and missing authors send the visitor home, keeping
/// `username`. Store failures are not redirected.
pub async fn tweet(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    query: Option<Query<ViewerQuery>>,
) -> Result<Response> {
    let query = viewer_query(query);
    let username = query.username();

    match ctx
        .services
        .page
        .tweet_page(&raw_id, username.clone(), query.viewer())
        .await
    {
        Ok(page) => Ok(response::json(http::StatusCode::OK, &page)),
        Err(err) if is_redirect_error(&err) => {
            log::info!("tweet page {:?} unavailable: {}", raw_id, err.detail());
            Ok(response::redirect(&home_location(username.as_deref())))
        }
        Err(err) => Err(err),
    }
}

/// `GET /?username=&userid=`
pub async fn home(
    State(ctx): State<AppContext>,
    query: Option<Query<ViewerQuery>>,
) -> Result<Response> {
    let query = viewer_query(query);
    let timeline = ctx
        .services
        .page
        .timeline(query.username(), query.viewer())
        .await?;
    Ok(response::json(http::StatusCode::OK, &timeline))
}
