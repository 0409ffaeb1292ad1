use crate::domain::model::*;
use serde::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserID,
    pub name: String,
}
