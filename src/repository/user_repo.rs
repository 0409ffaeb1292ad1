use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use crate::infra::DBConnector;
use crate::schema::users;
use async_trait::async_trait;
use diesel::prelude::*;

#[derive(Queryable)]
pub struct UserRecord {
    id: i32,
    name: String,
}

impl UserRecord {
    pub fn to_model(self) -> User {
        User {
            id: UserID(self.id),
            name: self.name,
        }
    }
}

pub struct UserRepository {
    db: DBConnector,
}

impl UserRepository {
    pub fn new(db: DBConnector) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IUserRepository for UserRepository {
    async fn find_by_id(&self, id: UserID) -> Result<User> {
        let record = self
            .db
            .first::<UserRecord, _>(users::table.filter(users::id.eq(id.0)))
            .await?;
        Ok(record.to_model())
    }
}
