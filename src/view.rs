use docview_api::{DocumentSource, RequestError};
use docview_lib::document::Document;
use docview_lib::query::{PageQuery, Skip, Limit};
use serde::Serialize;

/// whether moving between pages requests the new page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// previous/next load the page they move to
    #[default]
    OnChange,
    /// only the first page is loaded. previous/next change the range but
    /// keep showing the mounted documents
    MountOnly,
}

/// a page of documents from a [`DocumentSource`] along with the pagination
/// controls.
///
/// `documents` only ever holds the result of the last successful load. a
/// failed load leaves the current documents in place and hands the error
/// back to the caller.
pub struct DocumentListView<S> {
    source: S,
    documents: Vec<Document>,
    query: PageQuery,
    policy: FetchPolicy,
    mounted: bool,
}

impl<S> DocumentListView<S>
where
    S: DocumentSource
{
    pub fn new(source: S, query: PageQuery, policy: FetchPolicy) -> Self {
        DocumentListView {
            source,
            documents: Vec::new(),
            query,
            policy,
            mounted: false,
        }
    }

    /// loads the initial page. only the first call does anything
    pub fn mount(&mut self) -> Result<(), RequestError> {
        if self.mounted {
            return Ok(());
        }

        self.mounted = true;

        self.load_page(self.query.skip, self.query.limit)
    }

    pub fn load_page(&mut self, skip: Skip, limit: Limit) -> Result<(), RequestError> {
        let query = PageQuery::new(skip, limit);

        match self.source.fetch_page(&query) {
            Ok(documents) => {
                tracing::debug!(
                    skip,
                    limit,
                    count = documents.len(),
                    "loaded page"
                );

                self.documents = documents;

                Ok(())
            },
            Err(err) => {
                tracing::warn!(skip, limit, "failed to load page: {}", err);

                Err(err)
            }
        }
    }

    /// reloads the page for the current state
    pub fn reload(&mut self) -> Result<(), RequestError> {
        self.load_page(self.query.skip, self.query.limit)
    }

    pub fn next(&mut self) -> Result<(), RequestError> {
        self.move_to(self.query.next())
    }

    pub fn previous(&mut self) -> Result<(), RequestError> {
        self.move_to(self.query.previous())
    }

    fn move_to(&mut self, query: PageQuery) -> Result<(), RequestError> {
        tracing::debug!(from = self.skip(), to = query.skip, "moving page");

        self.query = query;

        match self.policy {
            FetchPolicy::OnChange => self.reload(),
            FetchPolicy::MountOnly => Ok(()),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn skip(&self) -> Skip {
        self.query.skip
    }

    pub fn limit(&self) -> Limit {
        self.query.limit
    }

    /// `(skip, skip + limit)` as shown to the user
    pub fn range(&self) -> (Skip, Skip) {
        (self.query.skip, self.query.range_end())
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let (skip, end) = self.range();

        ViewSnapshot {
            count: self.count(),
            skip,
            end,
            limit: self.limit(),
            documents: self.documents(),
        }
    }
}

/// everything a renderer needs from a view
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub count: usize,
    pub skip: Skip,
    pub end: Skip,
    pub limit: Limit,
    pub documents: &'a [Document],
}

impl<'a> ViewSnapshot<'a> {
    pub fn new(query: &PageQuery, documents: &'a [Document]) -> Self {
        ViewSnapshot {
            count: documents.len(),
            skip: query.skip,
            end: query.range_end(),
            limit: query.limit,
            documents,
        }
    }
}
