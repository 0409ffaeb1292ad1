use crate::domain::model::*;
use crate::error::*;
use crate::initializer::AppContext;
use crate::web::handlers::{json_body, viewer_query, Created, DataResponse};
use crate::web::params::ViewerQuery;
use crate::wrapper::response;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

/// `POST /api/tweets`
pub async fn create(
    State(ctx): State<AppContext>,
    body: std::result::Result<Json<CreateTweetRequest>, JsonRejection>,
) -> Result<Response> {
    let input = json_body(body)?;
    let id = ctx.services.tweet.create(input).await?;
    log::info!("created tweet {}", id);
    Ok(response::json(
        http::StatusCode::OK,
        &DataResponse {
            data: vec![Created { id: id.value() }],
        },
    ))
}

fn parse_id(raw: &str) -> Result<TweetID> {
    raw.parse::<TweetID>()
        .map_err(GeneralError::invalid_request)
}

/// `GET /api/tweets/{id}?userid=`
pub async fn detail(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    query: Option<Query<ViewerQuery>>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    let viewer = viewer_query(query).viewer();
    let detail = ctx.services.tweet.detail(id, viewer).await?;
    Ok(response::json(
        http::StatusCode::OK,
        &DataResponse { data: detail },
    ))
}

/// `GET /api/tweets/{id}/replies?userid=`
pub async fn replies(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    query: Option<Query<ViewerQuery>>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    let viewer = viewer_query(query).viewer();
    let replies = ctx.services.tweet.replies(id, viewer).await?;
    Ok(response::json(
        http::StatusCode::OK,
        &DataResponse { data: replies },
    ))
}
