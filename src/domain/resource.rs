//! Resource registry.
//!
//! [`ResourceKind`] names every resource the admin API exposes and knows its
//! endpoint, display names and navigation route. [`Resource`] binds one kind
//! to its wire types and form schema so the controllers in
//! [`crate::application`] can be written once and instantiated per resource.

use std::fmt;

use blogdesk_api_types::EntityId;
use serde::{Serialize, de::DeserializeOwned};

use super::columns::Column;
use super::form::{DropdownOption, FieldSpec, FormError, FormValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Blogs,
    Categories,
    Tags,
    BlogCategories,
    BlogTags,
    Drafts,
    Comments,
    Likes,
}

impl ResourceKind {
    /// Every resource, in navigation order.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Blogs,
        ResourceKind::Categories,
        ResourceKind::Tags,
        ResourceKind::BlogCategories,
        ResourceKind::BlogTags,
        ResourceKind::Drafts,
        ResourceKind::Comments,
        ResourceKind::Likes,
    ];

    /// Endpoint segment under the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Blogs => "blogs",
            ResourceKind::Categories => "categories",
            ResourceKind::Tags => "tags",
            ResourceKind::BlogCategories => "blogCategories",
            ResourceKind::BlogTags => "blogTags",
            ResourceKind::Drafts => "drafts",
            ResourceKind::Comments => "comments",
            ResourceKind::Likes => "likes",
        }
    }

    /// Singular name used in notifications.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Blogs => "Blog",
            ResourceKind::Categories => "Category",
            ResourceKind::Tags => "Tag",
            ResourceKind::BlogCategories => "BlogCategory",
            ResourceKind::BlogTags => "BlogTag",
            ResourceKind::Drafts => "Draft",
            ResourceKind::Comments => "Comment",
            ResourceKind::Likes => "Like",
        }
    }

    /// Navigation title.
    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Blogs => "Blogs",
            ResourceKind::Categories => "Categories",
            ResourceKind::Tags => "Tags",
            ResourceKind::BlogCategories => "Blog Categories",
            ResourceKind::BlogTags => "Blog Tags",
            ResourceKind::Drafts => "Drafts",
            ResourceKind::Comments => "Comments",
            ResourceKind::Likes => "Likes",
        }
    }

    pub fn route(self) -> String {
        format!("/{}", self.path())
    }

    pub fn collection_path(self) -> String {
        self.path().to_string()
    }

    pub fn item_path(self, id: EntityId) -> String {
        format!("{}/{id}", self.path())
    }

    pub fn dropdown_path(self) -> String {
        format!("{}/dropdown", self.path())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Binds a [`ResourceKind`] to its wire shapes and form schema.
///
/// Implementors are zero-sized markers; all behaviour is associated.
pub trait Resource: Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Full record returned by the detail endpoint and by writes.
    type Entity: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    /// Grid row returned inside list pages.
    type ListItem: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    /// Option returned by the dropdown endpoint.
    type Dropdown: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    /// Body accepted by create and update.
    type Payload: Serialize + fmt::Debug + Send + Sync + 'static;

    fn fields() -> &'static [FieldSpec];

    /// Entity columns of the grid, between the `Id` and `Actions` columns.
    fn columns() -> Vec<Column<Self::ListItem>>;

    fn entity_id(entity: &Self::Entity) -> EntityId;

    fn item_id(item: &Self::ListItem) -> EntityId;

    fn option(dropdown: &Self::Dropdown) -> DropdownOption;

    fn entity_option(entity: &Self::Entity) -> DropdownOption;

    /// Form values pre-populated from a loaded record.
    fn form_values(entity: &Self::Entity) -> FormValues;

    /// Write body for already validated form values.
    fn payload(values: &FormValues) -> Result<Self::Payload, FormError>;
}
