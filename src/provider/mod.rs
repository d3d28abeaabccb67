//! # Provider Module
//!
//! Providers are the streaming services the playlister can read from. Not every
//! provider's API supports every lookup, so a provider declares what it supports
//! through a [`Capabilities`] descriptor instead of implementing one wide
//! interface. The router reads that descriptor once at startup and registers a
//! route for each lookup that is present.
//!
//! ## Lookups
//!
//! - [`TrackLookup`] - a single track, e.g. `/spotify/track/<id>`
//! - [`AlbumLookup`] - all tracks of an album
//! - [`PlaylistLookup`] - all tracks of a playlist
//!
//! ## Pagination
//!
//! [`pagination`] turns a provider's cursor-linked pages into a lazy [`Pages`]
//! sequence and folds it into one list with [`collect_pages`].

pub mod pagination;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    types::{LookupKind, Track, TrackCollection},
};

pub use pagination::{MAX_PAGES, Page, PageSource, Pages, collect_pages};

#[async_trait]
pub trait TrackLookup: Send + Sync {
    async fn track(&self, identifier: &str) -> Result<Track, ProviderError>;
}

#[async_trait]
pub trait AlbumLookup: Send + Sync {
    async fn album(&self, identifier: &str) -> Result<TrackCollection, ProviderError>;
}

#[async_trait]
pub trait PlaylistLookup: Send + Sync {
    async fn playlist(&self, identifier: &str) -> Result<TrackCollection, ProviderError>;
}

/// A streaming service registered with the router.
pub trait Provider: Send + Sync {
    /// Path prefix of the provider's routes, e.g. `spotify`.
    fn identifier(&self) -> &str;

    /// The lookups this provider supports.
    fn capabilities(self: Arc<Self>) -> Capabilities;
}

/// Which lookups a provider exposes, each bound to its implementation.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub playlist: Option<Arc<dyn PlaylistLookup>>,
    pub album: Option<Arc<dyn AlbumLookup>>,
    pub track: Option<Arc<dyn TrackLookup>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, lookup: Arc<dyn PlaylistLookup>) -> Self {
        self.playlist = Some(lookup);
        self
    }

    pub fn with_album(mut self, lookup: Arc<dyn AlbumLookup>) -> Self {
        self.album = Some(lookup);
        self
    }

    pub fn with_track(mut self, lookup: Arc<dyn TrackLookup>) -> Self {
        self.track = Some(lookup);
        self
    }

    pub fn supports(&self, kind: LookupKind) -> bool {
        match kind {
            LookupKind::Playlist => self.playlist.is_some(),
            LookupKind::Album => self.album.is_some(),
            LookupKind::Track => self.track.is_some(),
        }
    }

    /// Supported lookups in registration order.
    pub fn kinds(&self) -> Vec<LookupKind> {
        LookupKind::ALL
            .into_iter()
            .filter(|kind| self.supports(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}
