use crate::domain::model::*;
use crate::error::*;
use crate::initializer::AppContext;
use crate::web::handlers::{json_body, Created, DataResponse};
use crate::wrapper::response;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

/// `POST /api/likes`
pub async fn create(
    State(ctx): State<AppContext>,
    body: std::result::Result<Json<CreateLikeRequest>, JsonRejection>,
) -> Result<Response> {
    let like = NewLike::from(json_body(body)?);
    let id = ctx.services.like.create(like).await?;
    log::info!(
        "user {} liked tweet {} (like {})",
        like.user_id.0,
        like.tweet_id,
        id.0
    );
    Ok(response::json(
        http::StatusCode::OK,
        &DataResponse {
            data: vec![Created { id: id.0 }],
        },
    ))
}
