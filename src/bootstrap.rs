use anyhow::Context;
use bookshelf_kernel::{settings::Settings, AppState, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry with every application module registered
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Apply pending migrations and return how many ran
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let registry = registry();
    let db = bookshelf_db::connect(&settings.database).await?;

    let applied = bookshelf_db::run_migrations(&db, &registry.collect_migrations()).await?;

    db.close()
        .await
        .context("failed to close database connection")?;
    Ok(applied)
}

/// Connect, migrate, start modules, and serve HTTP until shutdown
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %bookshelf_db::sanitize_url(&settings.database.url),
        "bookshelf bootstrap starting"
    );

    let registry = registry();
    let db = bookshelf_db::connect(&settings.database).await?;
    bookshelf_db::run_migrations(&db, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");

    let served = bookshelf_http::start_server(&registry, &settings, AppState::new(db.clone())).await;

    registry.stop_modules().await?;
    db.close()
        .await
        .context("failed to close database connection")?;

    served
}
