use anyhow::Context;
use product_editor::{
    Config, LocalProductStore, ProductStore, RemoteProductStore, init_logger_with_file,
    seed_demo_catalog,
};
use shared::Session;
use shared::models::Vertical;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(work_dir = %config.work_dir, "Product editor maintenance starting");

    // 2. 打开本地存储
    std::fs::create_dir_all(&config.work_dir)
        .with_context(|| format!("failed to create work dir {}", config.work_dir))?;
    let store_path = config.store_path();
    let local = LocalProductStore::open(&store_path, config.store_quota_bytes)
        .with_context(|| format!("failed to open store {}", store_path.display()))?;

    // 3. 升级旧记录
    let migrated = local.migrate_legacy()?;
    tracing::info!(migrated, "Legacy migration finished");

    // 4. 演示数据 (远程 API 优先)
    if let Some(raw) = config.seed_vertical.as_deref() {
        let vertical = Vertical::parse_lenient(raw)
            .with_context(|| format!("unknown SEED_VERTICAL '{}'", raw))?;
        let remote = RemoteProductStore::from_config(&config)?;
        let target: &dyn ProductStore = match &remote {
            Some(remote) => remote,
            None => &local,
        };
        let report = seed_demo_catalog(target, &Session::system(), vertical).await?;
        tracing::info!(
            vertical = %vertical,
            inserted = report.inserted,
            skipped = report.skipped,
            "Seeding finished"
        );
    }

    let products = local.list_products()?;
    tracing::info!(
        products = products.len(),
        used_bytes = local.used_bytes()?,
        quota_bytes = local.quota_bytes(),
        "Local store ready"
    );
    Ok(())
}
