// src/bin/seed_admin.rs
//! Create the admin account, or reset its password, from `ADMIN_USERNAME`
//! and `ADMIN_PASSWORD`.
use anyhow::{Context, Result};
use folio_core::application::commands::auth::{AdminProvisioning, AuthCommandService};
use folio_core::config::AppConfig;
use folio_core::infrastructure::{
    database, repositories::PostgresUserRepository, security::password::Argon2PasswordHasher,
    security::session_store::InMemorySessionStore, time::SystemClock,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string()),
        ))
        .init();

    let username = env::var("ADMIN_USERNAME").context("ADMIN_USERNAME is not set")?;
    let password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?;

    let config = AppConfig::from_env()?;
    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    // Provisioning never touches sessions; the in-memory store satisfies the port.
    let auth = AuthCommandService::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(SystemClock),
        config.session_ttl_secs(),
    );

    match auth.provision_admin(&username, &password).await? {
        AdminProvisioning::Created => println!("admin '{username}' created"),
        AdminProvisioning::PasswordReset => println!("password reset for '{username}'"),
    }
    Ok(())
}
