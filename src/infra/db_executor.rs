use crate::error::*;
use crate::infra::{PooledConnection, SqliteConnPool};
use diesel::connection::SimpleConnection;
use diesel::result::OptionalExtension;

#[derive(Debug)]
pub enum DBExecutorError {
    DBError,
    ConnectionError,
}

impl IServiceError for DBExecutorError {
    fn error_type(&self) -> String {
        use DBExecutorError::*;

        match self {
            DBError => "db_error",
            ConnectionError => "db_connection_error",
        }
        .to_string()
    }

    fn status_code(&self) -> http::StatusCode {
        use DBExecutorError::*;

        match self {
            DBError => http::StatusCode::INTERNAL_SERVER_ERROR,
            ConnectionError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<diesel::result::Error> for ServiceError {
    fn from(err: diesel::result::Error) -> ServiceError {
        use diesel::result::DatabaseErrorKind;
        use diesel::result::Error::*;

        match err {
            NotFound => ServiceError::new(RepositoryError::RecordNotFound, err),
            DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ServiceError::new(RepositoryError::DuplicateRecord, err)
            }
            _ => ServiceError::new(DBExecutorError::DBError, err),
        }
    }
}

#[derive(Clone)]
pub struct DBExecutor(SqliteConnPool);
impl DBExecutor {
    pub fn new(database_url: String, size_conn_pool: u32, enforce_foreign_keys: bool) -> DBExecutor {
        DBExecutor(SqliteConnPool::new(
            database_url,
            size_conn_pool,
            enforce_foreign_keys,
        ))
    }

    pub fn get_connection(&self) -> Result<PooledConnection> {
        self.0
            .get_connection()
            .map_err(|err| ServiceError::new(DBExecutorError::ConnectionError, err))
    }
}

/// Async face of the pool. Every call checks out a connection and runs the
/// query on the blocking thread pool.
#[derive(Clone)]
pub struct DBConnector(DBExecutor);

impl DBConnector {
    pub fn new(executor: DBExecutor) -> DBConnector {
        DBConnector(executor)
    }

    pub async fn ensure_initialized(&self) -> Result<()> {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            executor
                .0
                .ensure_initialized()
                .map_err(|err| ServiceError::new(DBExecutorError::ConnectionError, err))
        })
        .await?
    }

    /// Runs a batch of `;`-separated statements, e.g. the embedded schema.
    pub async fn batch_execute(&self, sql: &'static str) -> Result<()> {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = executor.get_connection()?;
            conn.batch_execute(sql)?;
            Ok(())
        })
        .await?
    }

    pub async fn first<T: 'static + Send, Q: 'static + Send>(&self, query: Q) -> Result<T>
    where
        Q: diesel::query_dsl::limit_dsl::LimitDsl,
        Q: diesel::RunQueryDsl<diesel::SqliteConnection>,
        diesel::helper_types::Limit<Q>:
            for<'a> diesel::query_dsl::LoadQuery<'a, diesel::SqliteConnection, T>,
    {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = executor.get_connection()?;
            let result = query.first(&mut conn)?;
            Ok(result)
        })
        .await?
    }

    /// Like `first`, but a missing row is `Ok(None)` instead of `RecordNotFound`.
    pub async fn first_optional<T: 'static + Send, Q: 'static + Send>(
        &self,
        query: Q,
    ) -> Result<Option<T>>
    where
        Q: diesel::query_dsl::limit_dsl::LimitDsl,
        Q: diesel::RunQueryDsl<diesel::SqliteConnection>,
        diesel::helper_types::Limit<Q>:
            for<'a> diesel::query_dsl::LoadQuery<'a, diesel::SqliteConnection, T>,
    {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = executor.get_connection()?;
            let result = query.first(&mut conn).optional()?;
            Ok(result)
        })
        .await?
    }

    pub async fn load<T: 'static + Send, Q: 'static + Send>(&self, query: Q) -> Result<Vec<T>>
    where
        Q: diesel::RunQueryDsl<diesel::SqliteConnection>,
        Q: for<'a> diesel::query_dsl::LoadQuery<'a, diesel::SqliteConnection, T>,
    {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = executor.get_connection()?;
            let result = query.load(&mut conn)?;
            Ok(result)
        })
        .await?
    }

    pub async fn get_result<T: 'static + Send, Q: 'static + Send>(&self, query: Q) -> Result<T>
    where
        Q: diesel::RunQueryDsl<diesel::SqliteConnection>,
        Q: for<'a> diesel::query_dsl::LoadQuery<'a, diesel::SqliteConnection, T>,
    {
        let executor = self.0.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = executor.get_connection()?;
            let result = query.get_result(&mut conn)?;
            Ok(result)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_should_report_unreachable_databases() {
        let db = DBConnector::new(DBExecutor::new(
            "/nonexistent-dir/definitely/missing.db".to_string(),
            1,
            true,
        ));
        let err = db.ensure_initialized().await.unwrap_err();
        assert!(err.is_error_of(DBExecutorError::ConnectionError));
        assert_eq!(err.status_code(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn it_should_map_diesel_errors() {
        let err: ServiceError = diesel::result::Error::NotFound.into();
        assert!(err.is_error_of(RepositoryError::RecordNotFound));

        let err: ServiceError = diesel::result::Error::RollbackTransaction.into();
        assert!(err.is_error_of(DBExecutorError::DBError));
    }
}
