use explore_with_me::config::{Config, init_tracing};
use explore_with_me::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_level, &config.log_format);

    server::run(config).await
}
