use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::{
    debug,
    error::ProviderError,
    provider::{AlbumLookup, Page, PageSource, Pages, PlaylistLookup, TrackLookup, collect_pages},
    spotify::{ALBUM_FIELDS, PLAYLIST_FIELDS, SpotifyProvider, TRACK_FIELDS},
    types::{
        AlbumData, AlbumTrackData, LookupKind, Paging, PlaylistItem, ReleaseDate, Track,
        TrackCollection, TrackData,
    },
    utils,
};

/// Follows `next` links of one lookup with a fixed bearer token.
struct CatalogPages<'a> {
    provider: &'a SpotifyProvider,
    token: &'a str,
    kind: LookupKind,
    identifier: &'a str,
}

#[async_trait]
impl<'a, T> PageSource<T> for CatalogPages<'a>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, url: &str) -> Result<Page<T>, ProviderError> {
        let paging: Paging<T> = self
            .provider
            .get_json(url, self.token, self.kind, self.identifier)
            .await?;
        Ok(Page::new(paging.items, paging.next))
    }
}

/// Normalizes a track that carries its own album, as in track and playlist lookups.
fn normalize_track(track: TrackData, new_release_days: u32, now: DateTime<Utc>) -> Track {
    let release = ReleaseDate::new(track.album.release_date, track.album.release_date_precision);
    Track {
        artist: utils::join_artists(&track.artists),
        track: track.name,
        is_single: utils::is_single(&track.album.album_type),
        album: track.album.name,
        is_new: utils::is_new(&release, new_release_days, now),
    }
}

#[async_trait]
impl TrackLookup for SpotifyProvider {
    async fn track(&self, identifier: &str) -> Result<Track, ProviderError> {
        debug!("Looking up Spotify track {}", identifier);
        let token = self.token().await?;
        let url = self.endpoint(&["tracks", identifier], TRACK_FIELDS)?;
        let data: TrackData = self
            .get_json(&url, &token, LookupKind::Track, identifier)
            .await?;

        Ok(normalize_track(data, self.new_release_days, Utc::now()))
    }
}

#[async_trait]
impl AlbumLookup for SpotifyProvider {
    /// Album tracks carry no release date of their own; the album's date and
    /// type are applied to every track.
    async fn album(&self, identifier: &str) -> Result<TrackCollection, ProviderError> {
        debug!("Looking up Spotify album {}", identifier);
        let token = self.token().await?;
        let url = self.endpoint(&["albums", identifier], ALBUM_FIELDS)?;
        let album: AlbumData = self
            .get_json(&url, &token, LookupKind::Album, identifier)
            .await?;

        let release = ReleaseDate::new(album.release_date, album.release_date_precision);
        let is_new = utils::is_new(&release, self.new_release_days, Utc::now());
        let is_single = utils::is_single(&album.album_type);
        let album_name = album.name;
        let to_track = |t: AlbumTrackData| Track {
            artist: utils::join_artists(&t.artists),
            track: t.name,
            is_single,
            album: album_name.clone(),
            is_new,
        };

        let mut tracks: Vec<Track> = album.tracks.items.into_iter().map(&to_track).collect();

        if let Some(next) = album.tracks.next.filter(|next| !next.is_empty()) {
            let source = CatalogPages {
                provider: self,
                token: &token,
                kind: LookupKind::Album,
                identifier,
            };
            let mut pages: Pages<AlbumTrackData> = Pages::new(&source, next);
            tracks.extend(collect_pages(&mut pages, |t| Some(to_track(t))).await?);
        }

        Ok(TrackCollection {
            tracks,
            collection_id: identifier.to_string(),
        })
    }
}

#[async_trait]
impl PlaylistLookup for SpotifyProvider {
    /// Playlist entries come from arbitrary albums, so each entry is classified
    /// by its own album's release date.
    async fn playlist(&self, identifier: &str) -> Result<TrackCollection, ProviderError> {
        debug!("Looking up Spotify playlist {}", identifier);
        let token = self.token().await?;
        let url = self.endpoint(&["playlists", identifier, "tracks"], PLAYLIST_FIELDS)?;
        let source = CatalogPages {
            provider: self,
            token: &token,
            kind: LookupKind::Playlist,
            identifier,
        };

        let new_release_days = self.new_release_days;
        let now = Utc::now();
        let mut pages: Pages<PlaylistItem> = Pages::new(&source, url);
        let tracks = collect_pages(&mut pages, |item| match item.track {
            Some(track) => Some(normalize_track(track, new_release_days, now)),
            None => {
                // removed entries come back with a null track
                debug!("Skipping playlist entry without track in {}", identifier);
                None
            }
        })
        .await?;

        Ok(TrackCollection {
            tracks,
            collection_id: identifier.to_string(),
        })
    }
}
