use std::default::Default;

use serde::{Serialize, Deserialize};

pub type Skip = i64;
pub type Limit = u32;

pub const DEFAULT_SKIP: Skip = 0;
pub const DEFAULT_LIMIT: Limit = 2;

/// the `(skip, limit)` pair that selects a page of documents.
///
/// skip is signed and never clamped. moving to the previous page from the
/// start produces a negative offset that is sent to the service as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub skip: Skip,
    pub limit: Limit,
}

impl PageQuery {
    pub fn new(skip: Skip, limit: Limit) -> Self {
        PageQuery { skip, limit }
    }

    /// last offset of the page as displayed, computed from the state and not
    /// from the number of documents returned
    pub fn range_end(&self) -> Skip {
        self.skip.saturating_add(self.limit as Skip)
    }

    pub fn next(&self) -> Self {
        PageQuery {
            skip: self.range_end(),
            limit: self.limit,
        }
    }

    pub fn previous(&self) -> Self {
        PageQuery {
            skip: self.skip.saturating_sub(self.limit as Skip),
            limit: self.limit,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}
