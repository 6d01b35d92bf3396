//! List query and page envelope.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// A single-field sort specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub dir: SortDir,
}

impl SortSpec {
    /// Parse a sort token: `-field` sorts descending, `field` ascending.
    ///
    /// Returns `None` for an empty token (or a bare `-`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let (field, dir) = match token.strip_prefix('-') {
            Some(rest) => (rest, SortDir::Desc),
            None => (token, SortDir::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_owned(),
            dir,
        })
    }
}

/// Raw list request as received from a caller.
///
/// `filter` is structured text (a JSON object of field → value equality
/// constraints); it is parsed and validated by the module, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub sort: Option<SortSpec>,
    pub skip: u64,
    pub limit: u64,
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        }
    }
}
