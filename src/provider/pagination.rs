use std::collections::HashSet;

use async_trait::async_trait;

use crate::{debug, error::ProviderError};

/// Upper bound on pages fetched for one lookup.
pub const MAX_PAGES: usize = 1000;

/// One page of raw items plus the link to the following page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }
}

/// Fetches a single page by URL.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Page<T>, ProviderError>;
}

/// A lazy sequence of pages following `next` links from a start URL.
///
/// Nothing is fetched until [`Pages::next_page`] is awaited. The sequence ends
/// at the first page whose `next` link is absent or empty. A link that was
/// already visited, or more than [`MAX_PAGES`] pages, fails the sequence
/// instead of looping forever.
pub struct Pages<'a, T> {
    source: &'a dyn PageSource<T>,
    start: String,
    cursor: Option<String>,
    visited: HashSet<String>,
}

impl<'a, T: Send> Pages<'a, T> {
    pub fn new(source: &'a dyn PageSource<T>, start: impl Into<String>) -> Self {
        let start = start.into();
        Self {
            source,
            cursor: Some(start.clone()),
            start,
            visited: HashSet::new(),
        }
    }

    /// Rewinds the sequence to its start URL.
    pub fn restart(&mut self) {
        self.cursor = Some(self.start.clone());
        self.visited.clear();
    }

    /// Number of pages fetched since the last (re)start.
    pub fn fetched(&self) -> usize {
        self.visited.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Fetches the next page, or returns `Ok(None)` once the sequence is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ProviderError> {
        let Some(url) = self.cursor.take() else {
            return Ok(None);
        };

        if self.visited.len() >= MAX_PAGES {
            return Err(ProviderError::Internal(format!(
                "pagination exceeded {} pages",
                MAX_PAGES
            )));
        }
        if !self.visited.insert(url.clone()) {
            return Err(ProviderError::Internal(format!(
                "pagination loop detected at {}",
                url
            )));
        }

        debug!("Fetching page {}: {}", self.visited.len(), url);
        let page = self.source.fetch_page(&url).await?;
        self.cursor = page.next.filter(|next| !next.is_empty());

        Ok(Some(page.items))
    }
}

/// Drains `pages`, mapping every item through `normalize`.
///
/// Items for which `normalize` returns `None` are skipped. Any page failure
/// discards everything collected so far.
pub async fn collect_pages<T, U, F>(
    pages: &mut Pages<'_, T>,
    mut normalize: F,
) -> Result<Vec<U>, ProviderError>
where
    T: Send,
    U: Send,
    F: FnMut(T) -> Option<U> + Send,
{
    let mut collected = Vec::new();
    while let Some(items) = pages.next_page().await? {
        collected.extend(items.into_iter().filter_map(&mut normalize));
    }
    Ok(collected)
}
