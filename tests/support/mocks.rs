// tests/support/mocks.rs
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;

use folio_core::application::ApplicationResult;
use folio_core::application::ports::media::{CoverFetcher, ImageIngestor, IngestedImage};
use folio_core::application::ports::security::PasswordHasher;
use folio_core::application::ports::time::Clock;
use folio_core::application::error::ApplicationError;
use folio_core::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use folio_core::domain::category::{
    Category, CategoryId, CategoryRef, CategoryRepository, CategoryUpdate, NewCategory,
};
use folio_core::domain::contact::{ContactId, ContactMessage, ContactRepository, NewContactMessage};
use folio_core::domain::errors::{DomainError, DomainResult};
use folio_core::domain::slug::{collation_eq, collation_key};
use folio_core::domain::user::{NewUser, PasswordHash, User, UserId, UserRepository, Username};
use folio_core::domain::video::{NewVideo, Video, VideoCover, VideoId, VideoRepository, VideoUpdate};

/// Start of test time; every clock reading moves one second past the last.
pub static EPOCH: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());

pub struct TickingClock {
    ticks: AtomicI64,
}

impl TickingClock {
    pub fn new() -> Self {
        Self {
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        *EPOCH + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// Stores `plain:<password>` so tests skip the cost of argon2.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("password mismatch"))
        }
    }
}

/// Hands out fake CDN images and remembers what was released.
#[derive(Default)]
pub struct RecordingImages {
    counter: AtomicUsize,
    pub ingested: Mutex<Vec<String>>,
    pub released: Mutex<Vec<String>>,
}

impl RecordingImages {
    fn next(&self, source: &str) -> IngestedImage {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let public_id = format!("articles/img-{n}");
        self.ingested.lock().unwrap().push(source.to_string());
        IngestedImage {
            url: format!("https://res.cloudinary.com/demo/image/upload/v1/{public_id}.jpg"),
            tiny_url: format!(
                "https://res.cloudinary.com/demo/image/upload/q_20,w_96,dpr_1,e_blur:300/v1/{public_id}.jpg"
            ),
            public_id,
        }
    }

    pub fn released(&self) -> Vec<String> {
        self.released.lock().unwrap().clone()
    }

    pub fn ingested(&self) -> Vec<String> {
        self.ingested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageIngestor for RecordingImages {
    async fn ingest_bytes(&self, data: Bytes, file_name: &str) -> ApplicationResult<IngestedImage> {
        if data.is_empty() {
            return Err(ApplicationError::validation("empty upload"));
        }
        Ok(self.next(&format!("file:{file_name}")))
    }

    async fn ingest_remote(&self, source_url: &str) -> ApplicationResult<IngestedImage> {
        Ok(self.next(source_url))
    }

    async fn release(&self, public_id: &str) {
        self.released.lock().unwrap().push(public_id.to_string());
    }
}

#[derive(Default)]
pub struct RecordingCovers {
    pub removed: Mutex<Vec<String>>,
}

impl RecordingCovers {
    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoverFetcher for RecordingCovers {
    async fn fetch_cover(&self, youtube_id: &str) -> VideoCover {
        VideoCover {
            url: format!("https://res.cloudinary.com/demo/image/upload/v1/videos/{youtube_id}.jpg"),
            public_id: format!("videos/{youtube_id}"),
        }
    }

    async fn remove_cover(&self, handle: &str) {
        self.removed.lock().unwrap().push(handle.to_string());
    }
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    categories: Vec<Category>,
    articles: Vec<Article>,
    videos: Vec<Video>,
    contacts: Vec<ContactMessage>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_ref(&self, id: CategoryId) -> DomainResult<CategoryRef> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(CategoryRef::from)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))
    }

    fn article_slug_taken(&self, slug_key: &str, exclude: Option<ArticleId>) -> bool {
        self.articles
            .iter()
            .any(|a| Some(a.id) != exclude && collation_key(a.slug.as_str()) == slug_key)
    }

    fn category_in_use(&self, id: CategoryId) -> bool {
        self.articles.iter().any(|a| a.category_id() == Some(id))
            || self.videos.iter().any(|v| v.category.as_ref().map(|c| c.id) == Some(id))
    }
}

/// One in-memory database behind every repository trait. Unique keys and
/// category references are enforced the way the Postgres schema does.
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
    video_writes_down: AtomicBool,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn article_count(&self) -> usize {
        self.tables.lock().unwrap().articles.len()
    }

    /// Make every following video update fail like a lost connection.
    pub fn fail_video_updates(&self) {
        self.video_writes_down.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let user = User {
            id: UserId::new(t.next_id())?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn set_password(&self, id: UserId, password_hash: PasswordHash) -> DomainResult<()> {
        let mut t = self.tables.lock().unwrap();
        let user = t
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        user.password_hash = password_hash;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryDb {
    async fn list(&self) -> DomainResult<Vec<Category>> {
        let t = self.tables.lock().unwrap();
        let mut items = t.categories.clone();
        items.sort_by_key(|c| collation_key(c.name.as_str()));
        Ok(items)
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let t = self.tables.lock().unwrap();
        Ok(t.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name_key(&self, name_key: &str) -> DomainResult<Option<Category>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .categories
            .iter()
            .find(|c| collation_key(c.name.as_str()) == name_key)
            .cloned())
    }

    async fn name_taken(&self, name_key: &str, exclude: Option<CategoryId>) -> DomainResult<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .categories
            .iter()
            .any(|c| Some(c.id) != exclude && collation_key(c.name.as_str()) == name_key))
    }

    async fn slug_taken(&self, slug_key: &str, exclude: Option<CategoryId>) -> DomainResult<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .categories
            .iter()
            .any(|c| Some(c.id) != exclude && collation_key(c.slug.as_str()) == slug_key))
    }

    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut t = self.tables.lock().unwrap();
        if t
            .categories
            .iter()
            .any(|c| collation_eq(c.name.as_str(), category.name.as_str()))
        {
            return Err(DomainError::Conflict("a category with this name already exists".into()));
        }
        if t
            .categories
            .iter()
            .any(|c| collation_eq(c.slug.as_str(), category.slug.as_str()))
        {
            return Err(DomainError::SlugTaken(category.slug.to_string()));
        }
        let created = Category {
            id: CategoryId::new(t.next_id())?,
            name: category.name,
            slug: category.slug,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        t.categories.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut t = self.tables.lock().unwrap();
        if t
            .categories
            .iter()
            .any(|c| c.id != update.id && collation_eq(c.slug.as_str(), update.slug.as_str()))
        {
            return Err(DomainError::SlugTaken(update.slug.to_string()));
        }
        let category = t
            .categories
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        category.name = update.name;
        category.slug = update.slug;
        category.updated_at = update.updated_at;
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut t = self.tables.lock().unwrap();
        if t.category_in_use(id) {
            return Err(DomainError::Conflict("category is still referenced".into()));
        }
        let before = t.categories.len();
        t.categories.retain(|c| c.id != id);
        if t.categories.len() == before {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleWriteRepository for MemoryDb {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut t = self.tables.lock().unwrap();
        if t.article_slug_taken(&collation_key(article.slug.as_str()), None) {
            return Err(DomainError::SlugTaken(article.slug.to_string()));
        }
        let category = article.category_id.map(|id| t.category_ref(id)).transpose()?;
        let created = Article {
            id: ArticleId::new(t.next_id())?,
            title: article.title,
            slug: article.slug,
            content: article.content,
            image: article.image,
            summary: article.summary,
            category,
            keywords: article.keywords,
            reading_minutes: article.reading_minutes,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        t.articles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut t = self.tables.lock().unwrap();
        if let Some(slug) = &update.slug {
            if t.article_slug_taken(&collation_key(slug.as_str()), Some(update.id)) {
                return Err(DomainError::SlugTaken(slug.to_string()));
            }
        }
        let category = update.category_id.map(|id| t.category_ref(id)).transpose()?;
        let article = t
            .articles
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict("article update conflict, please retry".into()));
        }

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(content) = update.content {
            article.content = content;
        }
        if let Some(image) = update.image {
            article.image = image;
        }
        if let Some(summary) = update.summary {
            article.summary = summary;
        }
        if category.is_some() {
            article.category = category;
        }
        if let Some(keywords) = update.keywords {
            article.keywords = keywords;
        }
        if let Some(minutes) = update.reading_minutes {
            article.reading_minutes = minutes;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<Article> {
        let mut t = self.tables.lock().unwrap();
        let pos = t
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        Ok(t.articles.remove(pos))
    }
}

#[async_trait]
impl ArticleReadRepository for MemoryDb {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let t = self.tables.lock().unwrap();
        Ok(t.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_slug_key(&self, slug_key: &str) -> DomainResult<Option<Article>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .articles
            .iter()
            .find(|a| collation_key(a.slug.as_str()) == slug_key)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        let t = self.tables.lock().unwrap();
        let mut items = t.articles.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(items)
    }

    async fn slug_taken(&self, slug_key: &str, exclude: Option<ArticleId>) -> DomainResult<bool> {
        Ok(self.tables.lock().unwrap().article_slug_taken(slug_key, exclude))
    }

    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t.articles.iter().any(|a| a.category_id() == Some(category_id)))
    }
}

#[async_trait]
impl VideoRepository for MemoryDb {
    async fn list(&self) -> DomainResult<Vec<Video>> {
        let t = self.tables.lock().unwrap();
        let mut items = t.videos.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(items)
    }

    async fn find_by_id(&self, id: VideoId) -> DomainResult<Option<Video>> {
        let t = self.tables.lock().unwrap();
        Ok(t.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn insert(&self, video: NewVideo) -> DomainResult<Video> {
        let mut t = self.tables.lock().unwrap();
        let category = video.category_id.map(|id| t.category_ref(id)).transpose()?;
        let created = Video {
            id: VideoId::new(t.next_id())?,
            title: video.title,
            youtube_id: video.youtube_id,
            cover: video.cover,
            category,
            created_at: video.created_at,
            updated_at: video.updated_at,
        };
        t.videos.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: VideoUpdate) -> DomainResult<Video> {
        if self.video_writes_down.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        let mut t = self.tables.lock().unwrap();
        let category = match update.category_id {
            Some(Some(id)) => Some(Some(t.category_ref(id)?)),
            Some(None) => Some(None),
            None => None,
        };
        let video = t
            .videos
            .iter_mut()
            .find(|v| v.id == update.id)
            .ok_or_else(|| DomainError::NotFound("video not found".into()))?;
        if let Some(title) = update.title {
            video.title = title;
        }
        if let Some(youtube_id) = update.youtube_id {
            video.youtube_id = youtube_id;
        }
        if let Some(cover) = update.cover {
            video.cover = cover;
        }
        if let Some(category) = category {
            video.category = category;
        }
        video.updated_at = update.updated_at;
        Ok(video.clone())
    }

    async fn delete(&self, id: VideoId) -> DomainResult<Video> {
        let mut t = self.tables.lock().unwrap();
        let pos = t
            .videos
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| DomainError::NotFound("video not found".into()))?;
        Ok(t.videos.remove(pos))
    }

    async fn any_in_category(&self, category_id: CategoryId) -> DomainResult<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .videos
            .iter()
            .any(|v| v.category.as_ref().map(|c| c.id) == Some(category_id)))
    }
}

#[async_trait]
impl ContactRepository for MemoryDb {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage> {
        let mut t = self.tables.lock().unwrap();
        let created = ContactMessage {
            id: ContactId::new(t.next_id())?,
            name: message.name,
            email: message.email,
            phone: message.phone,
            title: message.title,
            content: message.content,
            created_at: message.created_at,
        };
        t.contacts.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> DomainResult<Vec<ContactMessage>> {
        let t = self.tables.lock().unwrap();
        let mut items = t.contacts.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(items)
    }

    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<ContactMessage>> {
        let t = self.tables.lock().unwrap();
        Ok(t.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: ContactId) -> DomainResult<()> {
        let mut t = self.tables.lock().unwrap();
        let before = t.contacts.len();
        t.contacts.retain(|c| c.id != id);
        if t.contacts.len() == before {
            return Err(DomainError::NotFound("contact message not found".into()));
        }
        Ok(())
    }
}
