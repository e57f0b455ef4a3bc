// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService,
            auth::AuthCommandService,
            categories::CategoryCommandService,
            contacts::ContactCommandService,
            uploads::{UploadCommandService, UploadTargets},
            videos::VideoCommandService,
        },
        dto::AuthenticatedUser,
        error::ApplicationResult,
        ports::{
            media::{CoverFetcher, ImageIngestor, UploadSigner},
            security::{PasswordHasher, SessionStore},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            articles::ArticleQueryService, categories::CategoryQueryService,
            contacts::ContactQueryService, videos::VideoQueryService,
        },
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        category::CategoryRepository,
        contact::ContactRepository,
        user::UserRepository,
        video::VideoRepository,
    },
};

/// Repository handles the services are built from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub videos: Arc<dyn VideoRepository>,
    pub contacts: Arc<dyn ContactRepository>,
}

/// Non-repository adapters.
pub struct Adapters {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub sessions: Arc<dyn SessionStore>,
    pub images: Arc<dyn ImageIngestor>,
    pub covers: Arc<dyn CoverFetcher>,
    pub upload_signer: Arc<dyn UploadSigner>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
}

pub struct ServiceSettings {
    pub session_ttl_secs: u64,
    pub upload_targets: UploadTargets,
}

pub struct ApplicationServices {
    pub auth: Arc<AuthCommandService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub video_commands: Arc<VideoCommandService>,
    pub video_queries: Arc<VideoQueryService>,
    pub contact_commands: Arc<ContactCommandService>,
    pub contact_queries: Arc<ContactQueryService>,
    pub uploads: Arc<UploadCommandService>,
}

impl ApplicationServices {
    pub fn new(repos: Repositories, adapters: Adapters, settings: ServiceSettings) -> Self {
        let auth = Arc::new(AuthCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&adapters.password_hasher),
            Arc::clone(&adapters.sessions),
            Arc::clone(&adapters.clock),
            settings.session_ttl_secs,
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.categories),
            Arc::clone(&adapters.images),
            Arc::clone(&adapters.slugger),
            Arc::clone(&adapters.clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&repos.article_read)));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&repos.categories),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.videos),
            Arc::clone(&adapters.slugger),
            Arc::clone(&adapters.clock),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&repos.categories)));

        let video_commands = Arc::new(VideoCommandService::new(
            Arc::clone(&repos.videos),
            Arc::clone(&repos.categories),
            Arc::clone(&adapters.covers),
            Arc::clone(&adapters.clock),
        ));
        let video_queries = Arc::new(VideoQueryService::new(Arc::clone(&repos.videos)));

        let contact_commands = Arc::new(ContactCommandService::new(
            Arc::clone(&repos.contacts),
            Arc::clone(&adapters.clock),
        ));
        let contact_queries = Arc::new(ContactQueryService::new(Arc::clone(&repos.contacts)));

        let uploads = Arc::new(UploadCommandService::new(
            Arc::clone(&adapters.upload_signer),
            settings.upload_targets,
            Arc::clone(&adapters.clock),
        ));

        Self {
            auth,
            article_commands,
            article_queries,
            category_commands,
            category_queries,
            video_commands,
            video_queries,
            contact_commands,
            contact_queries,
            uploads,
        }
    }

    /// Resolve the admin behind a session id taken from a verified cookie.
    pub async fn authenticate(&self, session_id: &str) -> ApplicationResult<AuthenticatedUser> {
        self.auth.authenticate(session_id).await
    }
}
