use explore_with_me::config::{StatsConfig, init_tracing};
use explore_with_me::stats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StatsConfig::from_env()?;
    init_tracing(&config.log_level, &config.log_format);

    stats::server::run(config).await
}
