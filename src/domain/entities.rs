//! Resource bindings for every entity the admin API exposes.

use blogdesk_api_types::{
    Blog, BlogCategory, BlogCategoryListItem, BlogCategoryPayload, BlogDropdown, BlogPayload,
    BlogTag, BlogTagListItem, BlogTagPayload, Category, CategoryDropdown, CategoryPayload, Comment,
    CommentListItem, CommentPayload, Draft, DraftListItem, DraftPayload, EntityId, Like,
    LikeListItem, LikePayload, LinkDropdown, Tag, TagDropdown, TagPayload,
};

use super::columns::{Column, flag_cell};
use super::form::{DropdownOption, FieldSpec, FormError, FormValues};
use super::resource::{Resource, ResourceKind};

const BLOG_FIELD: FieldSpec =
    FieldSpec::relation("blog", "Blog", ResourceKind::Blogs, "Please select a Blog");
const CONTENT_FIELD: FieldSpec = FieldSpec::text("content", "Content", "Content is required");
const NAME_FIELD: FieldSpec = FieldSpec::text("name", "Name", "Name is required");

fn blog_option(blog: &Blog) -> DropdownOption {
    DropdownOption::new(blog.id, blog.title.clone())
}

fn category_option(category: &Category) -> DropdownOption {
    DropdownOption::new(category.id, category.name.clone())
}

fn tag_option(tag: &Tag) -> DropdownOption {
    DropdownOption::new(tag.id, tag.name.clone())
}

fn link_option(id: EntityId) -> DropdownOption {
    DropdownOption::new(id, format!("#{id}"))
}

// Blogs

pub struct Blogs;

impl Resource for Blogs {
    const KIND: ResourceKind = ResourceKind::Blogs;

    type Entity = Blog;
    type ListItem = Blog;
    type Dropdown = BlogDropdown;
    type Payload = BlogPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("title", "Title", "Title is required"),
            CONTENT_FIELD,
            FieldSpec::flag("published", "Published"),
        ];
        FIELDS
    }

    fn columns() -> Vec<Column<Blog>> {
        vec![
            Column::new("title", "Title", |blog| blog.title.clone()),
            Column::new("published", "Published", |blog| flag_cell(blog.published)),
        ]
    }

    fn entity_id(entity: &Blog) -> EntityId {
        entity.id
    }

    fn item_id(item: &Blog) -> EntityId {
        item.id
    }

    fn option(dropdown: &BlogDropdown) -> DropdownOption {
        DropdownOption::new(dropdown.id, dropdown.title.clone())
    }

    fn entity_option(entity: &Blog) -> DropdownOption {
        blog_option(entity)
    }

    fn form_values(entity: &Blog) -> FormValues {
        FormValues::empty(Self::fields())
            .with_text("title", entity.title.clone())
            .with_text("content", entity.content.clone())
            .with_flag("published", entity.published)
    }

    fn payload(values: &FormValues) -> Result<BlogPayload, FormError> {
        Ok(BlogPayload {
            title: values.text("title")?.to_string(),
            content: values.text("content")?.to_string(),
            published: values.flag("published")?,
        })
    }
}

// Categories

pub struct Categories;

impl Resource for Categories {
    const KIND: ResourceKind = ResourceKind::Categories;

    type Entity = Category;
    type ListItem = Category;
    type Dropdown = CategoryDropdown;
    type Payload = CategoryPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[NAME_FIELD];
        FIELDS
    }

    fn columns() -> Vec<Column<Category>> {
        vec![Column::new("name", "Name", |category| category.name.clone())]
    }

    fn entity_id(entity: &Category) -> EntityId {
        entity.id
    }

    fn item_id(item: &Category) -> EntityId {
        item.id
    }

    fn option(dropdown: &CategoryDropdown) -> DropdownOption {
        DropdownOption::new(dropdown.id, dropdown.name.clone())
    }

    fn entity_option(entity: &Category) -> DropdownOption {
        category_option(entity)
    }

    fn form_values(entity: &Category) -> FormValues {
        FormValues::empty(Self::fields()).with_text("name", entity.name.clone())
    }

    fn payload(values: &FormValues) -> Result<CategoryPayload, FormError> {
        Ok(CategoryPayload {
            name: values.text("name")?.to_string(),
        })
    }
}

// Tags

pub struct Tags;

impl Resource for Tags {
    const KIND: ResourceKind = ResourceKind::Tags;

    type Entity = Tag;
    type ListItem = Tag;
    type Dropdown = TagDropdown;
    type Payload = TagPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[NAME_FIELD];
        FIELDS
    }

    fn columns() -> Vec<Column<Tag>> {
        vec![Column::new("name", "Name", |tag| tag.name.clone())]
    }

    fn entity_id(entity: &Tag) -> EntityId {
        entity.id
    }

    fn item_id(item: &Tag) -> EntityId {
        item.id
    }

    fn option(dropdown: &TagDropdown) -> DropdownOption {
        DropdownOption::new(dropdown.id, dropdown.name.clone())
    }

    fn entity_option(entity: &Tag) -> DropdownOption {
        tag_option(entity)
    }

    fn form_values(entity: &Tag) -> FormValues {
        FormValues::empty(Self::fields()).with_text("name", entity.name.clone())
    }

    fn payload(values: &FormValues) -> Result<TagPayload, FormError> {
        Ok(TagPayload {
            name: values.text("name")?.to_string(),
        })
    }
}

// Blog ↔ category links

pub struct BlogCategories;

impl Resource for BlogCategories {
    const KIND: ResourceKind = ResourceKind::BlogCategories;

    type Entity = BlogCategory;
    type ListItem = BlogCategoryListItem;
    type Dropdown = LinkDropdown;
    type Payload = BlogCategoryPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            BLOG_FIELD,
            FieldSpec::relation(
                "category",
                "Category",
                ResourceKind::Categories,
                "Please select a Category",
            ),
        ];
        FIELDS
    }

    fn columns() -> Vec<Column<BlogCategoryListItem>> {
        vec![
            Column::new("blog", "Blog", |row| row.blog.title.clone()),
            Column::new("category", "Category", |row| row.category.name.clone()),
        ]
    }

    fn entity_id(entity: &BlogCategory) -> EntityId {
        entity.id
    }

    fn item_id(item: &BlogCategoryListItem) -> EntityId {
        item.id
    }

    fn option(dropdown: &LinkDropdown) -> DropdownOption {
        link_option(dropdown.id)
    }

    fn entity_option(entity: &BlogCategory) -> DropdownOption {
        link_option(entity.id)
    }

    fn form_values(entity: &BlogCategory) -> FormValues {
        FormValues::empty(Self::fields())
            .with_relation("blog", blog_option(&entity.blog))
            .with_relation("category", category_option(&entity.category))
    }

    fn payload(values: &FormValues) -> Result<BlogCategoryPayload, FormError> {
        Ok(BlogCategoryPayload {
            blog_id: values.relation_id("blog")?,
            category_id: values.relation_id("category")?,
        })
    }
}

// Blog ↔ tag links

pub struct BlogTags;

impl Resource for BlogTags {
    const KIND: ResourceKind = ResourceKind::BlogTags;

    type Entity = BlogTag;
    type ListItem = BlogTagListItem;
    type Dropdown = LinkDropdown;
    type Payload = BlogTagPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            BLOG_FIELD,
            FieldSpec::relation("tag", "Tag", ResourceKind::Tags, "Please select a Tag"),
        ];
        FIELDS
    }

    fn columns() -> Vec<Column<BlogTagListItem>> {
        vec![
            Column::new("blog", "Blog", |row| row.blog.title.clone()),
            Column::new("tag", "Tag", |row| row.tag.name.clone()),
        ]
    }

    fn entity_id(entity: &BlogTag) -> EntityId {
        entity.id
    }

    fn item_id(item: &BlogTagListItem) -> EntityId {
        item.id
    }

    fn option(dropdown: &LinkDropdown) -> DropdownOption {
        link_option(dropdown.id)
    }

    fn entity_option(entity: &BlogTag) -> DropdownOption {
        link_option(entity.id)
    }

    fn form_values(entity: &BlogTag) -> FormValues {
        FormValues::empty(Self::fields())
            .with_relation("blog", blog_option(&entity.blog))
            .with_relation("tag", tag_option(&entity.tag))
    }

    fn payload(values: &FormValues) -> Result<BlogTagPayload, FormError> {
        Ok(BlogTagPayload {
            blog_id: values.relation_id("blog")?,
            tag_id: values.relation_id("tag")?,
        })
    }
}

// Drafts

pub struct Drafts;

impl Resource for Drafts {
    const KIND: ResourceKind = ResourceKind::Drafts;

    type Entity = Draft;
    type ListItem = DraftListItem;
    type Dropdown = LinkDropdown;
    type Payload = DraftPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[BLOG_FIELD, CONTENT_FIELD];
        FIELDS
    }

    fn columns() -> Vec<Column<DraftListItem>> {
        vec![
            Column::new("blog", "Blog", |row| row.blog.title.clone()),
            Column::new("content", "Content", |row| row.content.clone()),
        ]
    }

    fn entity_id(entity: &Draft) -> EntityId {
        entity.id
    }

    fn item_id(item: &DraftListItem) -> EntityId {
        item.id
    }

    fn option(dropdown: &LinkDropdown) -> DropdownOption {
        link_option(dropdown.id)
    }

    fn entity_option(entity: &Draft) -> DropdownOption {
        link_option(entity.id)
    }

    fn form_values(entity: &Draft) -> FormValues {
        FormValues::empty(Self::fields())
            .with_relation("blog", blog_option(&entity.blog))
            .with_text("content", entity.content.clone())
    }

    fn payload(values: &FormValues) -> Result<DraftPayload, FormError> {
        Ok(DraftPayload {
            blog_id: values.relation_id("blog")?,
            content: values.text("content")?.to_string(),
        })
    }
}

// Comments

pub struct Comments;

impl Resource for Comments {
    const KIND: ResourceKind = ResourceKind::Comments;

    type Entity = Comment;
    type ListItem = CommentListItem;
    type Dropdown = LinkDropdown;
    type Payload = CommentPayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[BLOG_FIELD, CONTENT_FIELD];
        FIELDS
    }

    fn columns() -> Vec<Column<CommentListItem>> {
        vec![
            Column::new("blog", "Blog", |row| row.blog.title.clone()),
            Column::new("content", "Content", |row| row.content.clone()),
        ]
    }

    fn entity_id(entity: &Comment) -> EntityId {
        entity.id
    }

    fn item_id(item: &CommentListItem) -> EntityId {
        item.id
    }

    fn option(dropdown: &LinkDropdown) -> DropdownOption {
        link_option(dropdown.id)
    }

    fn entity_option(entity: &Comment) -> DropdownOption {
        link_option(entity.id)
    }

    fn form_values(entity: &Comment) -> FormValues {
        FormValues::empty(Self::fields())
            .with_relation("blog", blog_option(&entity.blog))
            .with_text("content", entity.content.clone())
    }

    fn payload(values: &FormValues) -> Result<CommentPayload, FormError> {
        Ok(CommentPayload {
            blog_id: values.relation_id("blog")?,
            content: values.text("content")?.to_string(),
        })
    }
}

// Likes

pub struct Likes;

impl Resource for Likes {
    const KIND: ResourceKind = ResourceKind::Likes;

    type Entity = Like;
    type ListItem = LikeListItem;
    type Dropdown = LinkDropdown;
    type Payload = LikePayload;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[BLOG_FIELD];
        FIELDS
    }

    fn columns() -> Vec<Column<LikeListItem>> {
        vec![Column::new("blog", "Blog", |row| row.blog.title.clone())]
    }

    fn entity_id(entity: &Like) -> EntityId {
        entity.id
    }

    fn item_id(item: &LikeListItem) -> EntityId {
        item.id
    }

    fn option(dropdown: &LinkDropdown) -> DropdownOption {
        link_option(dropdown.id)
    }

    fn entity_option(entity: &Like) -> DropdownOption {
        link_option(entity.id)
    }

    fn form_values(entity: &Like) -> FormValues {
        FormValues::empty(Self::fields()).with_relation("blog", blog_option(&entity.blog))
    }

    fn payload(values: &FormValues) -> Result<LikePayload, FormError> {
        Ok(LikePayload {
            blog_id: values.relation_id("blog")?,
        })
    }
}
