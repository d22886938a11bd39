//! Relation pickers and the pick-or-create capability.
//!
//! A picker never refers to another resource's form type. It looks the
//! related resource up in a [`RelationCatalog`] and talks to it through
//! [`RelationSource`] (search options, open a create form) and
//! [`NestedForm`] (fill in and submit that form).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::form::{DropdownOption, FieldKind, FieldSpec, FieldValue, FormValues};
use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::ValidationErrors;

use super::debounce::Debouncer;
use super::error::AppError;
use super::form::{FormModal, SubmitOutcome};
use super::queries::ResourceQueries;
use super::toasts::Toasts;

const SOURCE: &str = "application::picker";

/// Search and create capability of one resource, as seen by pickers.
#[async_trait]
pub trait RelationSource: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn options(&self, keyword: &str) -> Result<Vec<DropdownOption>, AppError>;

    /// A fresh create-mode form for this resource.
    fn create_form(&self, catalog: &RelationCatalog) -> Box<dyn NestedForm>;
}

/// Object-safe view of a create form opened from a picker.
#[async_trait]
pub trait NestedForm: Send {
    fn kind(&self) -> ResourceKind;

    fn fields(&self) -> &'static [FieldSpec];

    fn values(&self) -> &FormValues;

    fn errors(&self) -> &ValidationErrors;

    fn set_value(&mut self, field: &str, value: FieldValue) -> Result<(), AppError>;

    /// Parse and set a raw `field=value` right-hand side.
    fn assign(&mut self, field: &str, raw: &str) -> Result<(), AppError>;

    fn picker_mut(&mut self, field: &str) -> Option<&mut RelationPicker>;

    /// Submit; a saved record is returned as its picker option.
    async fn submit_option(&mut self) -> SubmitOutcome<DropdownOption>;

    fn cancel(&mut self);
}

/// Registry of relation sources, keyed by resource.
#[derive(Clone, Default)]
pub struct RelationCatalog {
    sources: Arc<HashMap<ResourceKind, Arc<dyn RelationSource>>>,
}

impl RelationCatalog {
    pub fn new(sources: impl IntoIterator<Item = Arc<dyn RelationSource>>) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.kind(), source))
            .collect();
        Self {
            sources: Arc::new(sources),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<Arc<dyn RelationSource>> {
        self.sources.get(&kind).cloned()
    }

    pub fn kinds(&self) -> Vec<ResourceKind> {
        let mut kinds: Vec<_> = self.sources.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl fmt::Debug for RelationCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationCatalog")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// [`RelationSource`] backed by a resource's queries.
pub struct QuerySource<R: Resource> {
    queries: ResourceQueries<R>,
    toasts: Toasts,
    debounce: Duration,
}

impl<R: Resource> QuerySource<R> {
    pub fn new(queries: ResourceQueries<R>, toasts: Toasts, debounce: Duration) -> Self {
        Self {
            queries,
            toasts,
            debounce,
        }
    }
}

#[async_trait]
impl<R: Resource> RelationSource for QuerySource<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    async fn options(&self, keyword: &str) -> Result<Vec<DropdownOption>, AppError> {
        self.queries.dropdown(keyword).await
    }

    fn create_form(&self, catalog: &RelationCatalog) -> Box<dyn NestedForm> {
        Box::new(FormModal::<R>::create(
            self.queries.clone(),
            self.toasts.clone(),
            catalog.clone(),
            self.debounce,
        ))
    }
}

/// Searchable, debounced picker for one relation field.
pub struct RelationPicker {
    field: &'static str,
    target: ResourceKind,
    source: Option<Arc<dyn RelationSource>>,
    text: String,
    debouncer: Debouncer<String>,
    options: Vec<DropdownOption>,
    error: Option<String>,
    queries_issued: u64,
    nested: Option<Box<dyn NestedForm>>,
}

impl RelationPicker {
    /// `None` unless `spec` is a relation field.
    pub fn new(spec: &FieldSpec, catalog: &RelationCatalog, debounce: Duration) -> Option<Self> {
        let FieldKind::Relation(target) = spec.kind else {
            return None;
        };
        Some(Self {
            field: spec.name,
            target,
            source: catalog.get(target),
            text: String::new(),
            debouncer: Debouncer::new(debounce),
            options: Vec::new(),
            error: None,
            queries_issued: 0,
            nested: None,
        })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn target(&self) -> ResourceKind {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dropdown queries issued so far.
    pub fn queries_issued(&self) -> u64 {
        self.queries_issued
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record a keystroke. No query is issued until the input pauses.
    pub fn type_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = text.clone();
        self.debouncer.push(text);
    }

    /// Wait out the debounce delay and forward the latest text to the
    /// dropdown query. Returns whether a query was issued.
    pub async fn settle(&mut self) -> Result<bool, AppError> {
        let Some(keyword) = self.debouncer.settle().await else {
            return Ok(false);
        };
        self.load_options(&keyword).await?;
        Ok(true)
    }

    pub async fn load_options(&mut self, keyword: &str) -> Result<&[DropdownOption], AppError> {
        let source = self.source()?;
        self.queries_issued += 1;
        debug!(
            target = SOURCE,
            field = self.field,
            resource = %self.target,
            keyword,
            "loading picker options"
        );
        match source.options(keyword).await {
            Ok(options) => {
                self.options = options;
                self.error = None;
                Ok(&self.options)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Reload the options for the current text right away.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let keyword = self.text.clone();
        self.load_options(&keyword).await.map(|_| ())
    }

    /// Open the related resource's create form.
    pub fn open_create(
        &mut self,
        catalog: &RelationCatalog,
    ) -> Result<&mut (dyn NestedForm + 'static), AppError> {
        let source = self.source()?;
        let form = self.nested.insert(source.create_form(catalog));
        Ok(form.as_mut())
    }

    pub fn nested(&self) -> Option<&dyn NestedForm> {
        self.nested.as_deref()
    }

    pub fn nested_mut(&mut self) -> Option<&mut (dyn NestedForm + 'static)> {
        self.nested.as_deref_mut()
    }

    /// Submit the nested form. The nested form stays open only when invalid.
    pub async fn submit_nested(&mut self) -> Result<SubmitOutcome<DropdownOption>, AppError> {
        let Some(nested) = self.nested.as_mut() else {
            return Err(AppError::unexpected(format!(
                "no create form is open for `{}`",
                self.field
            )));
        };
        let outcome = nested.submit_option().await;
        if !matches!(outcome, SubmitOutcome::Invalid(_)) {
            self.nested = None;
        }
        Ok(outcome)
    }

    pub fn close_nested(&mut self) {
        if let Some(mut nested) = self.nested.take() {
            nested.cancel();
        }
    }

    fn source(&self) -> Result<Arc<dyn RelationSource>, AppError> {
        self.source.clone().ok_or_else(|| {
            AppError::unexpected(format!("no relation source registered for `{}`", self.target))
        })
    }
}

impl fmt::Debug for RelationPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationPicker")
            .field("field", &self.field)
            .field("target", &self.target)
            .field("text", &self.text)
            .field("options", &self.options)
            .field("nested_open", &self.nested.is_some())
            .finish()
    }
}
