//! Query cache keys.
//!
//! Every key names the resource it belongs to so a write to one resource
//! can drop exactly that resource's collections.

use blogdesk_api_types::EntityId;

use crate::domain::resource::ResourceKind;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub kind: ResourceKind,
    /// Zero-based page index.
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

/// One record of a detail endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub kind: ResourceKind,
    pub id: EntityId,
}

/// One option set of a dropdown endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropdownKey {
    pub kind: ResourceKind,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List(ListKey),
    Detail(DetailKey),
    Dropdown(DropdownKey),
}

impl QueryKey {
    pub fn list(kind: ResourceKind, page: u32, page_size: u32, search: impl Into<String>) -> Self {
        Self::List(ListKey {
            kind,
            page,
            page_size,
            search: search.into(),
        })
    }

    pub fn detail(kind: ResourceKind, id: EntityId) -> Self {
        Self::Detail(DetailKey { kind, id })
    }

    pub fn dropdown(kind: ResourceKind, keyword: impl Into<String>) -> Self {
        Self::Dropdown(DropdownKey {
            kind,
            keyword: keyword.into(),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::List(key) => key.kind,
            Self::Detail(key) => key.kind,
            Self::Dropdown(key) => key.kind,
        }
    }

    /// Metric label of the key family.
    pub fn family(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Detail(_) => "detail",
            Self::Dropdown(_) => "dropdown",
        }
    }
}
