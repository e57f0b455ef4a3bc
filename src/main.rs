use folio_core::application::{
    commands::uploads::UploadTargets,
    ports::{
        media::{CoverFetcher, ImageIngestor, MediaStore, RemoteProbe, UploadSigner},
        security::{PasswordHasher, SessionStore},
        time::Clock,
        util::SlugGenerator,
    },
    services::{Adapters, ApplicationServices, Repositories, ServiceSettings},
};
use folio_core::config::AppConfig;
use folio_core::infrastructure::{
    database,
    media::{CdnImageIngestor, CloudinaryClient, CloudinaryCredentials, ReqwestProbe, YoutubeCoverFetcher},
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository, PostgresCategoryRepository,
        PostgresContactRepository, PostgresUserRepository, PostgresVideoRepository,
    },
    security::{
        cookie::{CookieSettings, SessionCookieSigner},
        password::Argon2PasswordHasher,
        redis_session_store::RedisSessionStore,
        session_store::InMemorySessionStore,
    },
    time::SystemClock,
    util::TurkishSlugGenerator,
};
use folio_core::presentation::http::{
    routes::{RouterSettings, build_router},
    state::HttpState,
};
use anyhow::{Result, anyhow};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        videos: Arc::new(PostgresVideoRepository::new(pool.clone())),
        contacts: Arc::new(PostgresContactRepository::new(pool)),
    };

    let sessions: Arc<dyn SessionStore> = match config.redis_url() {
        Some(url) => {
            tracing::info!("sessions stored in redis");
            Arc::new(RedisSessionStore::from_url(url)?)
        }
        None => {
            tracing::warn!("REDIS_URL not set; sessions are kept in memory and lost on restart");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let media_settings = config.cloudinary();
    let cloudinary = Arc::new(CloudinaryClient::new(CloudinaryCredentials {
        cloud_name: media_settings.cloud_name.clone(),
        api_key: media_settings.api_key.clone(),
        api_secret: media_settings.api_secret.clone(),
    })?);
    if !cloudinary.is_configured() {
        tracing::warn!("media CDN credentials missing; image uploads will fail");
    }
    let media: Arc<dyn MediaStore> = cloudinary.clone();
    let upload_signer: Arc<dyn UploadSigner> = cloudinary;
    let probe: Arc<dyn RemoteProbe> = Arc::new(ReqwestProbe::new()?);
    let images: Arc<dyn ImageIngestor> = Arc::new(CdnImageIngestor::new(
        Arc::clone(&media),
        Arc::clone(&probe),
        media_settings.article_folder.clone(),
    ));
    let covers: Arc<dyn CoverFetcher> = Arc::new(YoutubeCoverFetcher::new(media, probe));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(TurkishSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos,
        Adapters {
            password_hasher,
            sessions,
            images,
            covers,
            upload_signer,
            clock,
            slugger,
        },
        ServiceSettings {
            session_ttl_secs: config.session_ttl_secs(),
            upload_targets: UploadTargets {
                article_folder: media_settings.article_folder.clone(),
                article_upload_preset: media_settings.article_upload_preset.clone(),
            },
        },
    ));

    let cookies = SessionCookieSigner::new(
        config.session_secret(),
        CookieSettings {
            secure: config.is_production(),
            domain: config.cookie_domain().map(str::to_string),
        },
    )
    .map_err(|_| anyhow!("SESSION_SECRET cannot key the cookie signer"))?;

    let state = HttpState {
        services,
        cookies: Arc::new(cookies),
    };
    let app = build_router(
        state,
        &RouterSettings {
            allowed_origins: config.allowed_origins().to_vec(),
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
