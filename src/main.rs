use anishelf_lib::shared::{utils::init_logger, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env()?;
    anishelf_lib::run(config).await?;
    Ok(())
}
