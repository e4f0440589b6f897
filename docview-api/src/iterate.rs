use std::iter::Iterator;

use docview_lib::document::Document;
use docview_lib::query::PageQuery;

use crate::error::RequestError;
use crate::source::DocumentSource;

struct IterateData {
    iter: std::vec::IntoIter<Document>,
    query: PageQuery,
    len: usize,
}

enum IterateState {
    Empty,
    Done,
    Ready(IterateData)
}

impl IterateState {
    fn request_chunk<S>(
        source: &S,
        query: PageQuery,
    ) -> (Option<Result<Document, RequestError>>, IterateState)
    where
        S: DocumentSource + ?Sized
    {
        match source.fetch_page(&query) {
            Ok(page) => {
                let len = page.len();
                let mut iter = page.into_iter();

                let Some(item) = iter.next() else {
                    return (None, IterateState::Done);
                };

                (Some(Ok(item)), IterateState::Ready(IterateData {
                    iter,
                    query,
                    len
                }))
            },
            Err(err) => (Some(Err(err)), IterateState::Done),
        }
    }

    fn next_state<S>(
        self,
        source: &S,
        start: &PageQuery,
    ) -> (Option<Result<Document, RequestError>>, IterateState)
    where
        S: DocumentSource + ?Sized
    {
        match self {
            IterateState::Done => (None, IterateState::Done),
            IterateState::Empty => Self::request_chunk(source, *start),
            IterateState::Ready(mut data) => match data.iter.next() {
                Some(value) => (Some(Ok(value)), IterateState::Ready(data)),
                None => {
                    let next = data.query.next();

                    if data.len < data.query.limit as usize || next == data.query {
                        (None, IterateState::Done)
                    } else {
                        Self::request_chunk(source, next)
                    }
                }
            }
        }
    }
}

/// walks every page starting at `start`, one document at a time.
///
/// pages are only requested once the previous one has been consumed. an
/// empty page or a page shorter than the limit is taken as the last one and
/// iteration ends after the first error.
pub struct Iterate<'a, S>
where
    S: DocumentSource + ?Sized
{
    source: &'a S,
    start: PageQuery,
    state: IterateState,
}

impl<'a, S> Iterate<'a, S>
where
    S: DocumentSource + ?Sized
{
    pub fn new(source: &'a S, start: PageQuery) -> Self {
        Iterate {
            source,
            start,
            state: IterateState::Empty
        }
    }
}

impl<'a, S> Iterator for Iterate<'a, S>
where
    S: DocumentSource + ?Sized
{
    type Item = Result<Document, RequestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = std::mem::replace(&mut self.state, IterateState::Done);
        let (item, state) = curr.next_state(self.source, &self.start);

        self.state = state;

        item
    }
}
