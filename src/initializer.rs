use crate::domain::service;
use crate::error::*;
use crate::infra;
use crate::repository;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub db_url: String,
    pub db_pool_size: u32,
    pub enforce_foreign_keys: bool,
    pub bind_addr: std::net::SocketAddr,
    pub timeline_limit: i64,
}

#[derive(Clone)]
pub struct Infras {
    pub db: infra::DBConnector,
}

impl Infras {
    /// Checks the database is reachable and brings its schema up to date.
    pub async fn ensure_initialized(&self) -> Result<()> {
        self.db.ensure_initialized().await?;
        infra::migration::run(&self.db).await
    }
}

pub fn infras(config: &Config) -> Infras {
    let db_executor = infra::DBExecutor::new(
        config.db_url.clone(),
        config.db_pool_size,
        config.enforce_foreign_keys,
    );
    let db_connector = infra::DBConnector::new(db_executor);
    Infras { db: db_connector }
}

#[derive(Clone)]
pub struct Repository {
    pub tweet: Arc<repository::TweetRepository>,
    pub like: Arc<repository::LikeRepository>,
    pub user: Arc<repository::UserRepository>,
}

pub fn repository(infras: &Infras) -> Repository {
    let tweet = Arc::new(repository::TweetRepository::new(infras.db.clone()));
    let like = Arc::new(repository::LikeRepository::new(infras.db.clone()));
    let user = Arc::new(repository::UserRepository::new(infras.db.clone()));
    Repository { tweet, like, user }
}

#[derive(Clone)]
pub struct Services {
    pub tweet: service::TweetService,
    pub like: service::LikeService,
    pub page: service::PageService,
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub infras: Infras,
    pub repository: Repository,
    pub services: Services,
}

pub fn new(config: Config) -> AppContext {
    let infras = infras(&config);
    let repository = repository(&infras);
    let services = Services {
        tweet: service::TweetService::new(repository.tweet.clone()),
        like: service::LikeService::new(repository.like.clone()),
        page: service::PageService::new(
            repository.tweet.clone(),
            repository.like.clone(),
            repository.user.clone(),
            config.timeline_limit,
        ),
    };
    AppContext {
        config,
        infras,
        repository,
        services,
    }
}
