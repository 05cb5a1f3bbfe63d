// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{Stream, TryStreamExt};
use serde::Deserialize;

/// A single page of results from a query or read-feed.
#[derive(Clone, Debug)]
pub struct FeedPage<T> {
    items: Vec<T>,
    continuation: Option<String>,
}

impl<T> FeedPage<T> {
    pub fn new(items: Vec<T>, continuation: Option<String>) -> Self {
        Self {
            items,
            continuation,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The token to request the next page with, if there is one.
    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }
}

/// The body the service returns for document feeds.
#[derive(Deserialize)]
pub(crate) struct DocumentFeed<T> {
    #[serde(rename = "Documents")]
    pub documents: Vec<T>,
}

enum PagerState {
    Initial,
    More(String),
    Done,
}

/// A lazy stream of [`FeedPage`]s.
///
/// No request is sent until the first page is polled. The pager stops after a page with no continuation.
/// Issuing the same query again starts a fresh pager from the first page.
pub struct FeedPager<T> {
    stream: Pin<Box<dyn Stream<Item = crate::Result<FeedPage<T>>>>>,
}

impl<T: 'static> FeedPager<T> {
    /// Creates a pager that calls `make_request` once per page.
    ///
    /// `make_request` gets `None` for the first page, then the continuation returned by the previous page.
    pub fn from_callback<F, Fut>(make_request: F) -> Self
    where
        F: Fn(Option<String>) -> Fut + 'static,
        Fut: Future<Output = crate::Result<FeedPage<T>>> + 'static,
    {
        let stream = futures::stream::unfold(PagerState::Initial, move |state| {
            let request = match state {
                PagerState::Initial => Some(make_request(None)),
                PagerState::More(continuation) => Some(make_request(Some(continuation))),
                PagerState::Done => None,
            };
            async move {
                let page = match request {
                    Some(request) => request.await,
                    None => return None,
                };
                match page {
                    Ok(page) => {
                        let next = match page.continuation() {
                            Some(continuation) => PagerState::More(continuation.to_string()),
                            None => PagerState::Done,
                        };
                        Some((Ok(page), next))
                    }
                    // An error ends the stream.
                    Err(e) => Some((Err(e), PagerState::Done)),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Fetches every remaining page and returns all of their items.
    pub async fn into_items(mut self) -> crate::Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.try_next().await? {
            items.extend(page.into_items());
        }
        Ok(items)
    }
}

impl<T> Stream for FeedPager<T> {
    type Item = crate::Result<FeedPage<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}
