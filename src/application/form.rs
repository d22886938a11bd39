//! Create/edit form controller.
//!
//! One generic [`FormModal`] serves every resource. Edit mode loads the record
//! and pre-populates the form; create mode starts from empty values. Either
//! way every relation picker starts out with its unfiltered options.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use blogdesk_api_types::EntityId;
use tracing::{debug, info};

use crate::domain::form::{
    DropdownOption, FieldSpec, FieldValue, FormError, FormValues, find_spec, parse_value,
};
use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{ValidationErrors, validate, validate_field};

use super::error::AppError;
use super::picker::{NestedForm, RelationCatalog, RelationPicker};
use super::queries::ResourceQueries;
use super::toasts::{FORM_FAILURE, Toasts, created_message, updated_message};

const SOURCE: &str = "application::form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    pub fn from_id(id: Option<EntityId>) -> Self {
        id.map_or(FormMode::Create, FormMode::Edit)
    }

    pub fn id(self) -> Option<EntityId> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Validation failed; nothing was sent and the form stays open.
    Invalid(ValidationErrors),
    /// The write succeeded; the form closed with the resulting record.
    Saved(T),
    /// The write failed; the form closed without a result.
    Failed(AppError),
}

impl<T> SubmitOutcome<T> {
    /// Record handed back to the caller when the form closed.
    pub fn into_saved(self) -> Option<T> {
        match self {
            SubmitOutcome::Saved(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SubmitOutcome<U> {
        match self {
            SubmitOutcome::Invalid(errors) => SubmitOutcome::Invalid(errors),
            SubmitOutcome::Saved(value) => SubmitOutcome::Saved(f(value)),
            SubmitOutcome::Failed(err) => SubmitOutcome::Failed(err),
        }
    }
}

pub struct FormModal<R: Resource> {
    queries: ResourceQueries<R>,
    toasts: Toasts,
    catalog: RelationCatalog,
    mode: FormMode,
    values: FormValues,
    errors: ValidationErrors,
    pickers: Vec<RelationPicker>,
    loaded: Option<R::Entity>,
    submitted: bool,
    open: bool,
}

impl<R: Resource> FormModal<R> {
    pub fn new(
        queries: ResourceQueries<R>,
        toasts: Toasts,
        catalog: RelationCatalog,
        mode: FormMode,
        debounce: Duration,
    ) -> Self {
        let pickers = R::fields()
            .iter()
            .filter_map(|spec| RelationPicker::new(spec, &catalog, debounce))
            .collect();
        Self {
            queries,
            toasts,
            catalog,
            mode,
            values: FormValues::empty(R::fields()),
            errors: ValidationErrors::new(),
            pickers,
            loaded: None,
            submitted: false,
            open: true,
        }
    }

    pub fn create(
        queries: ResourceQueries<R>,
        toasts: Toasts,
        catalog: RelationCatalog,
        debounce: Duration,
    ) -> Self {
        Self::new(queries, toasts, catalog, FormMode::Create, debounce)
    }

    /// Open in the mode `id` selects and load the record in edit mode.
    pub async fn open(
        queries: ResourceQueries<R>,
        toasts: Toasts,
        catalog: RelationCatalog,
        id: Option<EntityId>,
        debounce: Duration,
    ) -> Result<Self, AppError> {
        let mut form = Self::new(queries, toasts, catalog, FormMode::from_id(id), debounce);
        form.load().await?;
        form.load_pickers().await;
        Ok(form)
    }

    /// Fetch the record in edit mode and pre-populate every field. Create
    /// mode issues no request.
    pub async fn load(&mut self) -> Result<(), AppError> {
        if let Some(entity) = self.queries.get_by_id(self.mode.id()).await? {
            self.values = R::form_values(&entity);
            self.loaded = Some(entity);
            debug!(target = SOURCE, resource = %R::KIND, mode = ?self.mode, "form pre-populated");
        }
        Ok(())
    }

    /// Fill every relation picker with the options for its current text.
    /// A failed load stays on the picker as its error.
    pub async fn load_pickers(&mut self) {
        for picker in &mut self.pickers {
            if let Err(err) = picker.refresh().await {
                debug!(
                    target = SOURCE,
                    resource = %R::KIND,
                    field = picker.field(),
                    error = %err,
                    "picker options unavailable"
                );
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn loaded(&self) -> Option<&R::Entity> {
        self.loaded.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn catalog(&self) -> &RelationCatalog {
        &self.catalog
    }

    pub fn picker(&self, field: &str) -> Option<&RelationPicker> {
        self.pickers.iter().find(|picker| picker.field() == field)
    }

    pub fn picker_mut(&mut self, field: &str) -> Option<&mut RelationPicker> {
        self.pickers.iter_mut().find(|picker| picker.field() == field)
    }

    // ========================================================================
    // Editing
    // ========================================================================

    pub fn set_value(&mut self, field: &str, value: FieldValue) -> Result<(), FormError> {
        self.values.set(R::fields(), field, value)?;
        if self.submitted {
            self.revalidate(field)?;
        }
        Ok(())
    }

    pub fn set_text(&mut self, field: &str, text: impl Into<String>) -> Result<(), FormError> {
        self.set_value(field, FieldValue::Text(text.into()))
    }

    pub fn set_flag(&mut self, field: &str, flag: bool) -> Result<(), FormError> {
        self.set_value(field, FieldValue::Flag(flag))
    }

    /// Pick an option, or clear the field with `None`. Clearing resets the
    /// field to the unselected sentinel and re-validates it immediately.
    pub fn select(&mut self, field: &str, option: Option<DropdownOption>) -> Result<(), FormError> {
        let cleared = option.is_none();
        let option = option.unwrap_or_else(DropdownOption::unselected);
        self.values.set(R::fields(), field, FieldValue::Relation(option))?;
        if cleared || self.submitted {
            self.revalidate(field)?;
        }
        Ok(())
    }

    /// Parse and set a raw command-line value.
    pub fn assign(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let value = parse_value(R::fields(), field, raw)?;
        self.set_value(field, value)
    }

    fn revalidate(&mut self, field: &str) -> Result<(), FormError> {
        let spec: &FieldSpec = find_spec(R::fields(), field)?;
        match validate_field(spec, self.values.get(field)) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(field),
        }
        Ok(())
    }

    /// Validate every field, replacing the inline errors.
    pub fn validate(&mut self) -> bool {
        match validate(R::fields(), &self.values) {
            Ok(()) => {
                self.errors = ValidationErrors::new();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    // ========================================================================
    // Submit / cancel
    // ========================================================================

    pub async fn submit(&mut self) -> SubmitOutcome<R::Entity> {
        self.submitted = true;
        if !self.validate() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let result = match R::payload(&self.values) {
            Ok(payload) => match self.mode {
                FormMode::Create => self.queries.create(&payload).await,
                FormMode::Edit(id) => self.queries.update(id, &payload).await,
            },
            Err(err) => Err(AppError::from(err)),
        };

        match result {
            Ok(entity) => {
                let message = match self.mode {
                    FormMode::Create => created_message(R::KIND),
                    FormMode::Edit(_) => updated_message(R::KIND),
                };
                self.toasts.success(message);
                self.queries.invalidate();
                self.discard_loaded();
                self.open = false;
                info!(
                    target = SOURCE,
                    resource = %R::KIND,
                    id = R::entity_id(&entity),
                    mode = ?self.mode,
                    "form saved"
                );
                SubmitOutcome::Saved(entity)
            }
            Err(err) => {
                self.toasts.error(err.notification_text(FORM_FAILURE));
                self.open = false;
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Close without a result.
    pub fn cancel(&mut self) {
        self.discard_loaded();
        for picker in &mut self.pickers {
            picker.close_nested();
        }
        self.open = false;
    }

    fn discard_loaded(&mut self) {
        if let FormMode::Edit(id) = self.mode {
            self.queries.discard_detail(id);
        }
    }

    // ========================================================================
    // Pick-or-create
    // ========================================================================

    /// Open the related resource's create form from the picker of `field`.
    pub fn open_related(
        &mut self,
        field: &str,
    ) -> Result<&mut (dyn NestedForm + 'static), AppError> {
        let catalog = self.catalog.clone();
        let picker = self
            .picker_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        picker.open_create(&catalog)
    }

    pub fn related_mut(&mut self, field: &str) -> Option<&mut (dyn NestedForm + 'static)> {
        self.picker_mut(field).and_then(RelationPicker::nested_mut)
    }

    /// Submit the nested create form of `field`. A saved record is written
    /// straight into the field.
    pub async fn submit_related(
        &mut self,
        field: &str,
    ) -> Result<SubmitOutcome<DropdownOption>, AppError> {
        let picker = self
            .picker_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        let outcome = picker.submit_nested().await?;
        if let SubmitOutcome::Saved(option) = &outcome {
            // The write invalidated the related dropdown.
            if let Err(err) = picker.refresh().await {
                debug!(
                    target = SOURCE,
                    resource = %R::KIND,
                    field,
                    error = %err,
                    "picker options unavailable"
                );
            }
            self.select(field, Some(option.clone()))?;
        }
        Ok(outcome)
    }
}

impl<R: Resource> fmt::Debug for FormModal<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModal")
            .field("kind", &R::KIND)
            .field("mode", &self.mode)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("open", &self.open)
            .finish()
    }
}

#[async_trait]
impl<R: Resource> NestedForm for FormModal<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn fields(&self) -> &'static [FieldSpec] {
        R::fields()
    }

    fn values(&self) -> &FormValues {
        &self.values
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn set_value(&mut self, field: &str, value: FieldValue) -> Result<(), AppError> {
        FormModal::set_value(self, field, value).map_err(AppError::from)
    }

    fn assign(&mut self, field: &str, raw: &str) -> Result<(), AppError> {
        FormModal::assign(self, field, raw).map_err(AppError::from)
    }

    fn picker_mut(&mut self, field: &str) -> Option<&mut RelationPicker> {
        FormModal::picker_mut(self, field)
    }

    async fn submit_option(&mut self) -> SubmitOutcome<DropdownOption> {
        self.submit().await.map(|entity| R::entity_option(&entity))
    }

    fn cancel(&mut self) {
        FormModal::cancel(self);
    }
}
