//! Draining paged listings

use std::future::Future;

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{Page, PageCursor};

/// Fetch every page of a listing and concatenate the items in page order
///
/// `fetch` receives `None` for the first page and the previous page's cursor
/// afterwards. Any failed page fails the whole listing, so callers never see
/// a partial result.
pub async fn drain_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<PageCursor>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<PageCursor> = None;
    let mut pages = 0usize;

    loop {
        let requested = cursor.clone();
        let page = fetch(cursor.take()).await?;
        pages += 1;
        items.extend(page.items);

        match page.next {
            Some(next) if requested.as_ref() == Some(&next) => {
                return Err(Error::provider(
                    "pagination",
                    format!("cursor did not advance after page {}: {:?}", pages, next),
                ));
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!("Drained {} page(s), {} item(s)", pages, items.len());
    Ok(items)
}
