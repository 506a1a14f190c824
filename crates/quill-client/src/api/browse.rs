//! Common browse query parameters.

use crate::endpoint::Params;

/// Query parameters shared by every browse endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    /// Page size, or `all`.
    pub limit: Option<String>,
    pub page: Option<u32>,
    /// NQL filter expression, e.g. `tag:news+featured:true`.
    pub filter: Option<String>,
    /// Relations to embed, e.g. `tags,authors`.
    pub include: Option<String>,
    pub fields: Option<String>,
    pub formats: Option<String>,
    pub order: Option<String>,
}

impl BrowseParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn formats(mut self, formats: impl Into<String>) -> Self {
        self.formats = Some(formats.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl From<BrowseParams> for Params {
    fn from(browse: BrowseParams) -> Self {
        Params::new()
            .set_opt("limit", browse.limit)
            .set_opt("page", browse.page)
            .set_opt("filter", browse.filter)
            .set_opt("include", browse.include)
            .set_opt("fields", browse.fields)
            .set_opt("formats", browse.formats)
            .set_opt("order", browse.order)
    }
}
