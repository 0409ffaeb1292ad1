pub mod likes;
pub mod pages;
pub mod tweets;

use crate::error::*;
use crate::web::params::ViewerQuery;
use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::Json;
use serde::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Created {
    pub id: i32,
}

/// Malformed bodies, wrong content types and oversized bodies are all 400s.
pub fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(it)| it)
        .map_err(GeneralError::invalid_request)
}

/// An unreadable query string counts as an empty one.
pub fn viewer_query(query: Option<Query<ViewerQuery>>) -> ViewerQuery {
    query.map(|Query(it)| it).unwrap_or_default()
}
