use crate::domain::model::UserID;
use serde::*;

/// `?username=&userid=` shared by the read routes. Both keys are optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ViewerQuery {
    pub username: Option<String>,
    pub userid: Option<String>,
}

impl ViewerQuery {
    /// Non-empty `username`, if any.
    pub fn username(&self) -> Option<String> {
        self.username.clone().filter(|it| !it.is_empty())
    }

    pub fn viewer(&self) -> UserID {
        UserID::parse_or_anonymous(self.userid.as_deref())
    }
}

/// `/` or `/?username=...`.
pub fn home_location(username: Option<&str>) -> String {
    match username {
        Some(username) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("username", username)
                .finish();
            format!("/?{}", query)
        }
        None => "/".to_string(),
    }
}
