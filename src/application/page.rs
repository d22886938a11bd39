//! Page container for one resource: the list, the form and the delete flow.
//!
//! The form is open exactly when `new_open` is set or an edit id is present.
//! Closing it through any path resets both.

use std::fmt;
use std::time::Duration;

use blogdesk_api_types::EntityId;
use tracing::{info, warn};

use crate::domain::resource::{Resource, ResourceKind};

use super::debounce::Debouncer;
use super::error::AppError;
use super::form::{FormModal, SubmitOutcome};
use super::list_view::{ListIntent, ListView};
use super::picker::RelationCatalog;
use super::queries::ResourceQueries;
use super::toasts::{DELETE_FAILURE, Toasts, deleted_message};

const SOURCE: &str = "application::page";

/// Result of confirming a delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// No delete was pending.
    Idle,
    Deleted(EntityId),
    Failed { id: EntityId, error: AppError },
}

pub struct PageContainer<R: Resource> {
    queries: ResourceQueries<R>,
    toasts: Toasts,
    catalog: RelationCatalog,
    list: ListView<R>,
    form: Option<FormModal<R>>,
    new_open: bool,
    edit_id: Option<EntityId>,
    delete_target: Option<EntityId>,
    search: Debouncer<String>,
    debounce: Duration,
}

impl<R: Resource> PageContainer<R> {
    pub fn new(
        queries: ResourceQueries<R>,
        toasts: Toasts,
        catalog: RelationCatalog,
        page_size: u32,
        debounce: Duration,
    ) -> Self {
        Self {
            list: ListView::new(queries.clone(), page_size),
            queries,
            toasts,
            catalog,
            form: None,
            new_open: false,
            edit_id: None,
            delete_target: None,
            search: Debouncer::new(debounce),
            debounce,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    pub fn list(&self) -> &ListView<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<R> {
        &mut self.list
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub async fn mount(&mut self) {
        self.list.mount().await;
    }

    // ========================================================================
    // Form lifecycle
    // ========================================================================

    pub fn modal_open(&self) -> bool {
        self.new_open || self.edit_id.is_some()
    }

    pub fn edit_id(&self) -> Option<EntityId> {
        self.edit_id
    }

    pub fn form(&self) -> Option<&FormModal<R>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormModal<R>> {
        self.form.as_mut()
    }

    /// Open an empty create form with its pickers loaded.
    pub async fn open_new(&mut self) -> &mut FormModal<R> {
        self.edit_id = None;
        self.new_open = true;
        let mut form = FormModal::create(
            self.queries.clone(),
            self.toasts.clone(),
            self.catalog.clone(),
            self.debounce,
        );
        form.load_pickers().await;
        self.form.insert(form)
    }

    /// Open the edit form for `id` and load the record.
    pub async fn open_edit(&mut self, id: EntityId) -> Result<&mut FormModal<R>, AppError> {
        self.new_open = false;
        self.edit_id = Some(id);
        let opened = FormModal::open(
            self.queries.clone(),
            self.toasts.clone(),
            self.catalog.clone(),
            Some(id),
            self.debounce,
        )
        .await;
        match opened {
            Ok(form) => Ok(self.form.insert(form)),
            Err(err) => {
                self.close_form();
                Err(err)
            }
        }
    }

    /// Route a row action from the list.
    pub async fn handle_intent(&mut self, intent: ListIntent) -> Result<(), AppError> {
        match intent {
            ListIntent::Edit(id) => self.open_edit(id).await.map(|_| ()),
            ListIntent::Delete(id) => {
                self.request_delete(id);
                Ok(())
            }
        }
    }

    /// Submit the open form. The list refetches after a saved write.
    pub async fn submit_form(&mut self) -> Option<SubmitOutcome<R::Entity>> {
        let form = self.form.as_mut()?;
        let outcome = form.submit().await;
        if !form.is_open() {
            self.close_form();
        }
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.list.sync().await;
        }
        Some(outcome)
    }

    pub fn cancel_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.cancel();
        }
        self.close_form();
    }

    fn close_form(&mut self) {
        self.form = None;
        self.new_open = false;
        self.edit_id = None;
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search.push(text.into());
    }

    /// Wait out the search debounce and apply the latest term.
    pub async fn settle_search(&mut self) -> bool {
        match self.search.settle().await {
            Some(term) => {
                self.list.set_search(&term).await;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Delete flow
    // ========================================================================

    pub fn delete_target(&self) -> Option<EntityId> {
        self.delete_target
    }

    pub fn request_delete(&mut self, id: EntityId) {
        self.delete_target = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
    }

    /// Issue the pending delete. The confirmation closes before the request
    /// resolves; the outcome is reported through a notification.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.delete_target.take() else {
            return DeleteOutcome::Idle;
        };

        match self.queries.remove(id).await {
            Ok(()) => {
                self.toasts.success(deleted_message(R::KIND));
                self.queries.invalidate();
                self.queries.discard_detail(id);
                info!(target = SOURCE, resource = %R::KIND, id, "record deleted");
                self.list.sync().await;
                DeleteOutcome::Deleted(id)
            }
            Err(error) => {
                warn!(
                    target = SOURCE,
                    resource = %R::KIND,
                    id,
                    error = %error,
                    "delete failed"
                );
                self.toasts.error(error.notification_text(DELETE_FAILURE));
                DeleteOutcome::Failed { id, error }
            }
        }
    }
}

impl<R: Resource> fmt::Debug for PageContainer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageContainer")
            .field("kind", &R::KIND)
            .field("new_open", &self.new_open)
            .field("edit_id", &self.edit_id)
            .field("delete_target", &self.delete_target)
            .finish()
    }
}
