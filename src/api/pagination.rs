// src/api/pagination.rs
//! Cursor-driven pagination over listing endpoints.

use super::types::PaginatedResponse;
use super::BlockRepository;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::NotionError;
use crate::model::Block;
use crate::types::BlockId;
use std::future::Future;

/// Fetches every page of a listing and concatenates the results in arrival
/// order.
///
/// `fetch_page` receives the cursor of the page to fetch (`None` for the
/// first one). The loop ends only when a page reports `has_more == false`;
/// any failed page aborts the whole listing.
pub async fn fetch_all_pages<T, F, Fut>(container: &str, mut fetch_page: F) -> Result<Vec<T>, NotionError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, NotionError>>,
{
    let mut all_items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_page(cursor.take()).await?;
        pages_fetched += 1;

        log::debug!(
            "Page {} of {}: {} results (has_more: {})",
            pages_fetched,
            container,
            response.results.len(),
            response.has_more
        );

        let next = response.continuation().map(str::to_owned);
        let has_more = response.has_more;
        all_items.extend(response.results);

        if !has_more {
            break;
        }

        match next {
            Some(next) => cursor = Some(next),
            None => {
                log::warn!(
                    "{} reported more results after page {} but sent no cursor",
                    container,
                    pages_fetched
                );
                return Err(NotionError::MissingCursor {
                    container: container.to_string(),
                });
            }
        }
    }

    Ok(all_items)
}

/// Lists every child of `container`, following cursors until exhausted.
pub async fn fetch_all_children<R>(repository: &R, container: &BlockId) -> Result<Vec<Block>, NotionError>
where
    R: BlockRepository + ?Sized,
{
    fetch_all_pages(container.as_str(), move |cursor| async move {
        repository
            .list_children(container, cursor.as_deref(), Some(NOTION_API_PAGE_SIZE))
            .await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out prepared pages and records the cursor of each request.
    struct Pages {
        pages: Mutex<VecDeque<PaginatedResponse<u32>>>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    impl Pages {
        fn new(pages: Vec<PaginatedResponse<u32>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                cursors: Mutex::new(Vec::new()),
            }
        }

        async fn next(&self, cursor: Option<String>) -> Result<PaginatedResponse<u32>, NotionError> {
            self.cursors.lock().unwrap().push(cursor);
            Ok(self.pages.lock().unwrap().pop_front().expect("no more pages prepared"))
        }
    }

    #[tokio::test]
    async fn concatenates_pages_in_arrival_order() {
        let pages = Pages::new(vec![
            PaginatedResponse::more(vec![1, 2], "c2"),
            PaginatedResponse::more(vec![3], "c3"),
            PaginatedResponse::last(vec![4, 5]),
        ]);

        let items = fetch_all_pages("page-1", |cursor| pages.next(cursor)).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *pages.cursors.lock().unwrap(),
            vec![None, Some("c2".to_string()), Some("c3".to_string())]
        );
    }

    #[tokio::test]
    async fn single_empty_page_is_one_call() {
        let pages = Pages::new(vec![PaginatedResponse::last(Vec::new())]);

        let items = fetch_all_pages("page-1", |cursor| pages.next(cursor)).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(pages.cursors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn more_without_cursor_is_a_contract_violation() {
        for cursor in [None, Some(String::new())] {
            let pages = Pages::new(vec![PaginatedResponse {
                next_cursor: cursor,
                ..PaginatedResponse::more(vec![1], "")
            }]);

            let error = fetch_all_pages("page-1", |cursor| pages.next(cursor))
                .await
                .unwrap_err();

            assert!(
                matches!(&error, NotionError::MissingCursor { container } if container == "page-1"),
                "{:?}",
                error
            );
        }
    }

    #[tokio::test]
    async fn failed_page_discards_earlier_results() {
        let mut calls = 0;
        let result: Result<Vec<u32>, _> = fetch_all_pages("page-1", |_| {
            calls += 1;
            let call = calls;
            async move {
                if call == 1 {
                    Ok(PaginatedResponse::more(vec![1], "c2"))
                } else {
                    Err(NotionError::MissingConfiguration("boom".into()))
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }
}
