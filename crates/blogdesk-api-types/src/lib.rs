//! Request and response shapes of the blog platform admin API.
//!
//! Every resource comes in up to four shapes: the full record returned by
//! `GET /{resource}/{id}` (relations embedded as full records), the grid row
//! returned inside list pages (relations abbreviated to their dropdown shape),
//! the dropdown option returned by `GET /{resource}/dropdown`, and the write
//! payload accepted by `POST`/`PUT` (relations sent as foreign ids).

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
pub type EntityId = i64;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub result: Vec<T>,
    pub total: u64,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            total: 0,
        }
    }
}

// Blogs

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub published: bool,
}

/// Grid rows carry the full blog record.
pub type BlogListItem = Blog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDropdown {
    pub id: EntityId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl From<&Blog> for BlogDropdown {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
        }
    }
}

// Categories

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

pub type CategoryListItem = Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDropdown {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

impl From<&Category> for CategoryDropdown {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

// Tags

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
}

pub type TagListItem = Tag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDropdown {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPayload {
    pub name: String,
}

impl From<&Tag> for TagDropdown {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}

/// Dropdown shape of the link resources, which expose ids only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDropdown {
    pub id: EntityId,
}

// Blog ↔ category links

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: EntityId,
    pub blog: Blog,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogCategoryListItem {
    pub id: EntityId,
    pub blog: BlogDropdown,
    pub category: CategoryDropdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategoryPayload {
    pub blog_id: EntityId,
    pub category_id: EntityId,
}

// Blog ↔ tag links

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogTag {
    pub id: EntityId,
    pub blog: Blog,
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogTagListItem {
    pub id: EntityId,
    pub blog: BlogDropdown,
    pub tag: TagDropdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogTagPayload {
    pub blog_id: EntityId,
    pub tag_id: EntityId,
}

// Drafts

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: EntityId,
    pub blog: Blog,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftListItem {
    pub id: EntityId,
    pub blog: BlogDropdown,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    pub blog_id: EntityId,
    pub content: String,
}

// Comments

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub blog: Blog,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentListItem {
    pub id: EntityId,
    pub blog: BlogDropdown,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub blog_id: EntityId,
    pub content: String,
}

// Likes

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: EntityId,
    pub blog: Blog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeListItem {
    pub id: EntityId,
    pub blog: BlogDropdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikePayload {
    pub blog_id: EntityId,
}
