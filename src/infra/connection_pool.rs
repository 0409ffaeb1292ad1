use diesel::connection::SimpleConnection;
use diesel::{r2d2, sqlite::SqliteConnection};
use lazy_init::LazyTransform;
use std::sync::Arc;
use std::time::Duration;

const BUSY_TIMEOUT_MS: u32 = 5_000;
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

type Pool = r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>;
pub type PooledConnection = ::r2d2::PooledConnection<r2d2::ConnectionManager<SqliteConnection>>;

#[derive(Clone)]
pub struct SqliteConnPool(Arc<LazyTransform<Config, std::result::Result<Pool, String>>>);

struct Config {
    database_url: String,
    size_conn_pool: u32,
    enforce_foreign_keys: bool,
}

/// Per-connection pragmas. SQLite keeps `foreign_keys` per connection, so it is
/// set every time the pool hands one out.
#[derive(Debug)]
struct ConnectionOptions {
    enforce_foreign_keys: bool,
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        let foreign_keys = if self.enforce_foreign_keys { "ON" } else { "OFF" };
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = {};",
            BUSY_TIMEOUT_MS, foreign_keys
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

fn initialize(config: Config) -> std::result::Result<Pool, String> {
    log::info!(
        "opening sqlite pool at {} (size {}, foreign keys {})",
        config.database_url,
        config.size_conn_pool,
        if config.enforce_foreign_keys { "on" } else { "off" }
    );
    let manager = r2d2::ConnectionManager::<SqliteConnection>::new(config.database_url);
    r2d2::Pool::builder()
        .max_size(config.size_conn_pool)
        .connection_timeout(CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(ConnectionOptions {
            enforce_foreign_keys: config.enforce_foreign_keys,
        }))
        .build(manager)
        .map_err(|err| format!("Failed to create pool: {}", err))
}

impl SqliteConnPool {
    pub fn new(
        database_url: String,
        size_conn_pool: u32,
        enforce_foreign_keys: bool,
    ) -> SqliteConnPool {
        SqliteConnPool(Arc::new(LazyTransform::new(Config {
            database_url,
            size_conn_pool,
            enforce_foreign_keys,
        })))
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        self.get_connection().map(|_| ())
    }

    pub fn get_connection(&self) -> anyhow::Result<PooledConnection> {
        match self.0.get_or_create(initialize) {
            Ok(pool) => Ok(pool.get()?),
            Err(err) => Err(anyhow::anyhow!(err.clone())),
        }
    }
}
