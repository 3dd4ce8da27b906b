use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;
use yt_tldr::SummaryApp;
use yt_tldr::api::handler;
use yt_tldr::core::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    yt_tldr::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let app = Arc::new(SummaryApp::new(&config));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let app = Arc::clone(&app);
        async move { handler(&app, event).await }
    }))
    .await
}
