use serde::{Serialize, Deserialize};

pub type DocId = i64;

/// a single record as returned by the document service.
///
/// every field other than `doc_id` is treated as display text. the `date` is
/// kept in whatever format the service sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    pub date: String,
    pub url: String,
    pub author: String,
    pub concept1: String,
    pub concept2: String,
}

impl Document {
    pub fn concepts(&self) -> [&str; 2] {
        [self.concept1.as_str(), self.concept2.as_str()]
    }
}
