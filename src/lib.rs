pub mod api;
pub mod config;
pub mod crypto;
pub mod db;

pub use db::DbPool;

use config::Config;
use std::sync::Arc;

use crate::api::auth::{AdminAuthorizer, Authorizer};

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let authorizer: Arc<dyn Authorizer> =
            Arc::new(AdminAuthorizer::new(config.auth.admin_email.clone()));
        Self {
            config,
            db,
            authorizer,
        }
    }
}
