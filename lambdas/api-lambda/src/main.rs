use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use universeex_shared::AppState;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // CloudWatch stamps every line already
        .without_time()
        .with_target(false)
        .init();

    let state = Arc::new(AppState::from_env()?);
    tracing::info!(
        "Gallery Lambda ready - api base: {} cache ttl: {}s",
        state.config.api_base,
        state.config.cache_ttl.as_secs()
    );

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
