use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use backend::{
    image_storage::{ImageStore, S3ImageStore},
    server,
    session::AccessGate,
    state::AppState,
    types::Environment,
};
use catalog_storage::{
    backend::{RedisBackend, RedisClient},
    CatalogStore,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, human-readable for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let redis_client = RedisClient::new(&environment.redis_url()).await?;
    let catalog_store = Arc::new(CatalogStore::new(
        Arc::new(RedisBackend::new(redis_client)),
        environment.catalog_key(),
    ));

    let access_gate = Arc::new(AccessGate::from_environment(&environment));

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let image_store: Arc<dyn ImageStore> = Arc::new(S3ImageStore::new(
        s3_client,
        environment.s3_bucket(),
        environment.image_public_base_url(),
    ));

    server::start(
        environment,
        AppState {
            catalog_store,
            access_gate,
            image_store,
        },
    )
    .await
}
