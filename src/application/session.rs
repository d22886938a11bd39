//! Authenticated session: the API client, the shared query cache and the
//! notification stack every controller of one login shares.

use std::sync::Arc;
use std::time::Duration;

use blogdesk_api_types::EntityId;
use tracing::info;

use crate::cache::{CacheConfig, QueryCache};
use crate::config::Settings;
use crate::domain::entities::{
    BlogCategories, BlogTags, Blogs, Categories, Comments, Drafts, Likes, Tags,
};
use crate::domain::resource::Resource;
use crate::infra::error::InfraError;
use crate::infra::http::ApiClient;

use super::error::AppError;
use super::form::FormModal;
use super::list_view::ListView;
use super::page::PageContainer;
use super::picker::{QuerySource, RelationCatalog, RelationSource};
use super::queries::ResourceQueries;
use super::toasts::Toasts;

const SOURCE: &str = "application::session";

#[derive(Clone)]
pub struct Session {
    api: ApiClient,
    cache: Arc<QueryCache>,
    toasts: Toasts,
    catalog: RelationCatalog,
    settings: Arc<Settings>,
}

impl Session {
    /// Start a session. Every request made through it carries `token`.
    pub fn login(settings: Settings, token: &str) -> Result<Self, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Unauthenticated);
        }
        let base_url = settings
            .api
            .base_url
            .as_deref()
            .ok_or_else(|| InfraError::configuration("api.base_url is not set"))?;

        let api = ApiClient::new(base_url, token)?;
        let cache = Arc::new(QueryCache::new(&CacheConfig::from(&settings.cache)));
        let toasts = Toasts::new(
            settings.ui.toast_ttl,
            usize::try_from(settings.ui.max_toasts.get()).unwrap_or(usize::MAX),
        );

        let debounce = settings.ui.debounce;
        let sources = [
            source::<Blogs>(&api, &cache, &toasts, debounce),
            source::<Categories>(&api, &cache, &toasts, debounce),
            source::<Tags>(&api, &cache, &toasts, debounce),
            source::<BlogCategories>(&api, &cache, &toasts, debounce),
            source::<BlogTags>(&api, &cache, &toasts, debounce),
            source::<Drafts>(&api, &cache, &toasts, debounce),
            source::<Comments>(&api, &cache, &toasts, debounce),
            source::<Likes>(&api, &cache, &toasts, debounce),
        ];

        info!(target = SOURCE, base_url = %api.base(), "session started");
        Ok(Self {
            api,
            cache,
            toasts,
            catalog: RelationCatalog::new(sources),
            settings: Arc::new(settings),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn catalog(&self) -> &RelationCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn queries<R: Resource>(&self) -> ResourceQueries<R> {
        ResourceQueries::new(self.api.clone(), Arc::clone(&self.cache))
    }

    pub fn list_view<R: Resource>(&self) -> ListView<R> {
        ListView::new(self.queries(), self.settings.ui.page_size.get())
    }

    /// Form in create mode for `None`, otherwise edit mode with the record
    /// loaded.
    pub async fn form<R: Resource>(&self, id: Option<EntityId>) -> Result<FormModal<R>, AppError> {
        FormModal::open(
            self.queries(),
            self.toasts.clone(),
            self.catalog.clone(),
            id,
            self.settings.ui.debounce,
        )
        .await
    }

    pub fn page<R: Resource>(&self) -> PageContainer<R> {
        PageContainer::new(
            self.queries(),
            self.toasts.clone(),
            self.catalog.clone(),
            self.settings.ui.page_size.get(),
            self.settings.ui.debounce,
        )
    }

    /// Drop every cached response. Clones of this session share the cache.
    pub fn logout(&self) {
        self.cache.clear();
        info!(target = SOURCE, "session ended");
    }
}

fn source<R: Resource>(
    api: &ApiClient,
    cache: &Arc<QueryCache>,
    toasts: &Toasts,
    debounce: Duration,
) -> Arc<dyn RelationSource> {
    Arc::new(QuerySource::<R>::new(
        ResourceQueries::new(api.clone(), Arc::clone(cache)),
        toasts.clone(),
        debounce,
    ))
}
