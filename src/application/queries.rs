//! Generic query and mutation operations for one resource.

use std::marker::PhantomData;
use std::sync::Arc;

use blogdesk_api_types::{EntityId, ListPage};
use tracing::{debug, instrument};

use crate::cache::{QueryCache, QueryKey};
use crate::domain::form::DropdownOption;
use crate::domain::resource::{Resource, ResourceKind};
use crate::infra::http::ApiClient;

use super::error::AppError;

const SOURCE: &str = "application::queries";

/// Page request in the controllers' zero-based numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            search: search.into(),
        }
    }

    /// One-based page number sent to the server.
    pub fn server_page(&self) -> u32 {
        self.page.saturating_add(1)
    }

    pub fn key(&self, kind: ResourceKind) -> QueryKey {
        QueryKey::list(kind, self.page, self.page_size, self.search.clone())
    }
}

/// One page of grid rows plus the server-side total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> From<ListPage<T>> for ListResult<T> {
    fn from(page: ListPage<T>) -> Self {
        Self {
            items: page.result,
            total: page.total,
        }
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Typed access to one resource's endpoints through the session cache.
pub struct ResourceQueries<R: Resource> {
    api: ApiClient,
    cache: Arc<QueryCache>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceQueries<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: Arc::clone(&self.cache),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceQueries<R> {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self {
            api,
            cache,
            _resource: PhantomData,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Cached page when present, otherwise a fetch.
    pub async fn list(&self, query: &ListQuery) -> Result<ListResult<R::ListItem>, AppError> {
        let key = query.key(R::KIND);
        if let Some(page) = self.cache.get::<ListResult<R::ListItem>>(&key) {
            return Ok(page);
        }
        self.fetch_list(query).await
    }

    /// Always hits the network and refreshes the cache entry.
    #[instrument(skip(self), fields(resource = %R::KIND))]
    pub async fn fetch_list(
        &self,
        query: &ListQuery,
    ) -> Result<ListResult<R::ListItem>, AppError> {
        let generation = self.generation();
        let search = (!query.search.is_empty()).then_some(query.search.as_str());
        let page: ListPage<R::ListItem> = self
            .api
            .get(&R::KIND.collection_path())?
            .query("page", query.server_page())
            .query("limit", query.page_size)
            .query_opt("search", search)
            .send()
            .await?;

        let result = ListResult::from(page);
        debug!(
            target = SOURCE,
            rows = result.items.len(),
            total = result.total,
            "fetched list page"
        );
        self.cache.put_if_current(query.key(R::KIND), result.clone(), generation);
        Ok(result)
    }

    /// Loads one record; `None` issues no request.
    pub async fn get_by_id(&self, id: Option<EntityId>) -> Result<Option<R::Entity>, AppError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let key = QueryKey::detail(R::KIND, id);
        if let Some(entity) = self.cache.get::<R::Entity>(&key) {
            return Ok(Some(entity));
        }

        let generation = self.generation();
        let entity: R::Entity = self.api.get(&R::KIND.item_path(id))?.send().await?;
        self.cache.put_if_current(key, entity.clone(), generation);
        Ok(Some(entity))
    }

    /// Picker options; the keyword is sent only when non-empty.
    pub async fn dropdown(&self, keyword: &str) -> Result<Vec<DropdownOption>, AppError> {
        let key = QueryKey::dropdown(R::KIND, keyword);
        if let Some(options) = self.cache.get::<Vec<DropdownOption>>(&key) {
            return Ok(options);
        }

        let generation = self.generation();
        let keyword_param = (!keyword.is_empty()).then_some(keyword);
        let raw: Vec<R::Dropdown> = self
            .api
            .get(&R::KIND.dropdown_path())?
            .query_opt("keyword", keyword_param)
            .send()
            .await?;
        let options: Vec<DropdownOption> = raw.iter().map(R::option).collect();
        self.cache.put_if_current(key, options.clone(), generation);
        Ok(options)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    #[instrument(skip(self, payload), fields(resource = %R::KIND))]
    pub async fn create(&self, payload: &R::Payload) -> Result<R::Entity, AppError> {
        let entity = self
            .api
            .post(&R::KIND.collection_path())?
            .json(payload)?
            .send()
            .await?;
        Ok(entity)
    }

    #[instrument(skip(self, payload), fields(resource = %R::KIND))]
    pub async fn update(&self, id: EntityId, payload: &R::Payload) -> Result<R::Entity, AppError> {
        let entity = self
            .api
            .put(&R::KIND.item_path(id))?
            .json(payload)?
            .send()
            .await?;
        Ok(entity)
    }

    #[instrument(skip(self), fields(resource = %R::KIND))]
    pub async fn remove(&self, id: EntityId) -> Result<(), AppError> {
        self.api.delete(&R::KIND.item_path(id))?.send_unit().await?;
        Ok(())
    }

    // ========================================================================
    // Cache control
    // ========================================================================

    /// Marks every list and dropdown of this resource stale.
    pub fn invalidate(&self) -> u64 {
        self.cache.invalidate(R::KIND)
    }

    pub fn discard_detail(&self, id: EntityId) {
        self.cache.discard_detail(R::KIND, id);
    }

    pub fn generation(&self) -> u64 {
        self.cache.generation(R::KIND)
    }
}
