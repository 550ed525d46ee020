use std::env::{self, set_var};
use std::net::SocketAddr;
use std::sync::Arc;

use api::config::Config;
use api::create_app;
use api::state::AppState;
use lambda_http::{run, Error};
use shared::clients::chesscom_client::ChessComClient;
use shared::clients::lichess_client::LichessClient;
use shared::repositories::document_store::DocumentStore;
use shared::repositories::dynamodb_document_store::DynamoDbDocumentStore;
use shared::repositories::in_memory_document_store::InMemoryDocumentStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .init();

    let store: Arc<dyn DocumentStore + Send + Sync> = if config.uses_memory_store() {
        info!("Using the in-memory document store");
        Arc::new(InMemoryDocumentStore::new())
    } else {
        let database_name = config.database_name_or_default();
        info!("Using DynamoDB tables prefixed with {}", database_name);
        Arc::new(DynamoDbDocumentStore::connect(config.database_url.as_deref(), database_name).await)
    };

    let chesscom_api = Arc::new(ChessComClient::new(&config.chesscom_api_url)?);
    let lichess_api = Arc::new(LichessClient::new(&config.lichess_api_url)?);

    let port = config.port;
    let app = create_app(AppState::new(config, store, chesscom_api, lichess_api));

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");
        return run(app).await;
    }

    let address = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on {}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
