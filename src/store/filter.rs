use bson::Bson;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Options for [`ProfileStore::find`](super::ProfileStore::find).
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Fields removed from every returned document.
    pub omit_fields: Option<Vec<String>>,
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Filter expression evaluated against stored documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    True,
    And(Vec<Filter>),
    /// The value at `path` equals `value`.
    Eq { path: String, value: Bson },
    /// The string at `path` contains `pattern`, case-insensitively.
    Contains { path: String, pattern: String },
    /// The string array at `path` holds, for every pattern, at least one
    /// element containing it case-insensitively.
    AllContain { path: String, patterns: Vec<String> },
}
