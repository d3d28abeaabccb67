use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The lookups a provider may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Playlist,
    Album,
    Track,
}

impl LookupKind {
    /// Registration order used by the router and the `/capabilities` listing.
    pub const ALL: [LookupKind; 3] = [LookupKind::Playlist, LookupKind::Album, LookupKind::Track];

    /// Name used in route paths, e.g. `/spotify/playlist/...`.
    pub fn as_str(self) -> &'static str {
        match self {
            LookupKind::Playlist => "playlist",
            LookupKind::Album => "album",
            LookupKind::Track => "track",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LookupKind::Playlist => "Playlist",
            LookupKind::Album => "Album",
            LookupKind::Track => "Track",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, provider-agnostic track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub artist: String,
    pub track: String,
    pub is_single: bool,
    pub album: String,
    pub is_new: bool,
}

/// The tracks of an album or playlist in provider order.
///
/// `collection_id` echoes the identifier the caller asked for, not a normalized ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCollection {
    pub tracks: Vec<Track>,
    pub collection_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Day,
    Month,
    Year,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A release date as reported by a provider, with the precision it was reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDate {
    pub raw: String,
    pub precision: DatePrecision,
}

impl ReleaseDate {
    pub fn new(raw: impl Into<String>, precision: DatePrecision) -> Self {
        Self {
            raw: raw.into(),
            precision,
        }
    }
}

// Spotify Web API payloads, restricted to the fields requested through the
// `fields` filter.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Decodes a missing or `null` field to the type's default.
///
/// Spotify sends `null` for the album type and release date of local files, and
/// episodes come back without artists under the `fields` filter.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date_precision: DatePrecision,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: AlbumSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<TrackData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTrackData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date_precision: DatePrecision,
    pub tracks: Paging<AlbumTrackData>,
}

/// One page of a paginated Spotify listing.
///
/// `next` is `null` (or, in some payloads, an empty string) on the last page.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}
