use docview_lib::document::Document;
use docview_lib::query::PageQuery;

use crate::client::ApiClient;
use crate::documents::QueryDocuments;
use crate::error::RequestError;

/// anything that can hand back a single page of documents
pub trait DocumentSource {
    fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Document>, RequestError>;
}

impl DocumentSource for ApiClient {
    fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Document>, RequestError> {
        QueryDocuments::page(*query).send(self)
    }
}

impl<S> DocumentSource for &S
where
    S: DocumentSource + ?Sized
{
    fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Document>, RequestError> {
        (**self).fetch_page(query)
    }
}
