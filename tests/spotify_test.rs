mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use cick_playlister::{
    config::ClientCredentials,
    error::ProviderError,
    management::Token,
    provider::{AlbumLookup, PlaylistLookup, Provider, TrackLookup},
    server::build_router,
    spotify::SpotifyProvider,
    types::{LookupKind, Track, TrackCollection},
};
use common::{CLIENT_ID, CLIENT_SECRET, FakeSpotify};
use reqwest::StatusCode;

fn provider(fake: &FakeSpotify) -> SpotifyProvider {
    SpotifyProvider::with_endpoints(
        ClientCredentials::new(CLIENT_ID, CLIENT_SECRET),
        90,
        fake.api_url(),
        fake.token_url(),
    )
}

#[tokio::test]
async fn test_track_lookup_normalizes_track() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let track = spotify.track("abc").await.unwrap();

    assert_eq!(
        track,
        Track {
            artist: "Robyn, Kleerup".to_string(),
            track: "Track abc".to_string(),
            is_single: true,
            album: "With Every Heartbeat".to_string(),
            is_new: true,
        }
    );
    assert_eq!(fake.token_requests(), 1);
    assert_eq!(fake.api_requests(), 1);
}

#[tokio::test]
async fn test_repeated_track_lookups_reuse_token() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let first = serde_json::to_string(&spotify.track("abc").await.unwrap()).unwrap();
    let second = serde_json::to_string(&spotify.track("abc").await.unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(fake.token_requests(), 1);
    assert_eq!(fake.api_requests(), 2);
    assert_eq!(spotify.tokens().current().await.unwrap().value, "token-1");
}

#[tokio::test]
async fn test_seeded_token_skips_exchange() {
    let fake = FakeSpotify::start().await;
    let spotify =
        provider(&fake).with_token(Token::new("token-seeded", Utc::now() + Duration::hours(1)));

    spotify.track("abc").await.unwrap();

    assert_eq!(fake.token_requests(), 0);
}

#[tokio::test]
async fn test_upstream_status_mapping() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let invalid = spotify.track("bad").await.unwrap_err();
    assert_eq!(
        invalid,
        ProviderError::InvalidIdentifier {
            kind: LookupKind::Track,
            identifier: "bad".to_string(),
        }
    );
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

    let missing = spotify.track("missing").await.unwrap_err();
    assert_eq!(
        missing,
        ProviderError::NotFound {
            kind: LookupKind::Track,
            identifier: "missing".to_string(),
        }
    );
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let failed = spotify.track("boom").await.unwrap_err();
    assert_eq!(failed, ProviderError::Upstream { status: 500 });
    assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_wrong_credentials_fail_lookup() {
    let fake = FakeSpotify::start().await;
    let spotify = SpotifyProvider::with_endpoints(
        ClientCredentials::new(CLIENT_ID, "nope"),
        90,
        fake.api_url(),
        fake.token_url(),
    );

    let result = spotify.playlist("abc").await;

    assert_eq!(result, Err(ProviderError::Authentication));
    assert_eq!(fake.api_requests(), 0);
}

#[tokio::test]
async fn test_album_lookup_follows_all_pages() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let album = spotify.album("heaven").await.unwrap();

    let names = album
        .tracks
        .iter()
        .map(|t| t.track.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "Cherry-coloured Funk",
            "Pitch the Baby",
            "Iceblink Luck",
            "Fifty-fifty Clown"
        ]
    );
    assert_eq!(album.collection_id, "heaven");
    // album container plus two track pages
    assert_eq!(fake.api_requests(), 3);

    // the album's own date and type apply to every track
    assert!(album.tracks.iter().all(|t| t.album == "Heaven or Las Vegas"));
    assert!(album.tracks.iter().all(|t| !t.is_single && !t.is_new));
    assert!(album.tracks.iter().all(|t| t.artist == "Cocteau Twins"));
}

#[tokio::test]
async fn test_album_not_found() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let result = spotify.album("missing").await;

    assert_eq!(
        result,
        Err(ProviderError::NotFound {
            kind: LookupKind::Album,
            identifier: "missing".to_string(),
        })
    );
}

#[tokio::test]
async fn test_playlist_lookup_classifies_each_entry() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let playlist = spotify.playlist("mix").await.unwrap();

    assert_eq!(
        playlist,
        TrackCollection {
            tracks: vec![
                Track {
                    artist: "Caribou".to_string(),
                    track: "Honey".to_string(),
                    is_single: true,
                    album: "Honey".to_string(),
                    is_new: true,
                },
                Track {
                    artist: "Massive Attack, Elizabeth Fraser".to_string(),
                    track: "Teardrop".to_string(),
                    is_single: false,
                    album: "Mezzanine".to_string(),
                    is_new: false,
                },
            ],
            collection_id: "mix".to_string(),
        }
    );
    assert_eq!(fake.api_requests(), 2);
}

#[tokio::test]
async fn test_playlist_invalid_identifier() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let result = spotify.playlist("bad").await;

    assert_eq!(
        result,
        Err(ProviderError::InvalidIdentifier {
            kind: LookupKind::Playlist,
            identifier: "bad".to_string(),
        })
    );
}

#[tokio::test]
async fn test_identifier_stays_in_its_path_segment() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    // "abc/../../albums/x" must not be resolved against the API path
    let result = spotify.track("abc/../../albums/x").await.unwrap();

    assert_eq!(result.track, "Track abc/../../albums/x");
}

#[test]
fn test_spotify_declares_all_lookups() {
    let spotify = Arc::new(SpotifyProvider::with_endpoints(
        ClientCredentials::new(CLIENT_ID, CLIENT_SECRET),
        90,
        "http://127.0.0.1:9/v1",
        "http://127.0.0.1:9/api/token",
    ));

    assert_eq!(spotify.identifier(), "spotify");
    assert_eq!(spotify.new_release_days(), 90);
    assert_eq!(
        spotify.capabilities().kinds(),
        vec![LookupKind::Playlist, LookupKind::Album, LookupKind::Track]
    );
}

#[tokio::test]
async fn test_playlist_route_end_to_end() {
    let fake = FakeSpotify::start().await;
    let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(provider(&fake))];
    let base = common::serve(build_router(&providers)).await;

    let response = reqwest::get(format!("{}/spotify/playlist/mix", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["collectionId"], "mix");
    assert_eq!(body["tracks"][0]["artist"], "Caribou");
    assert_eq!(body["tracks"][0]["isSingle"], true);
    assert_eq!(body["tracks"][1]["album"], "Mezzanine");
    assert_eq!(body["tracks"][1]["isNew"], false);

    let missing = reqwest::get(format!("{}/spotify/album/missing", base))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.text().await.unwrap(), "Album not found: missing");
}

#[tokio::test]
async fn test_playlist_with_local_files_and_episodes() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let playlist = spotify.playlist("local").await.unwrap();

    assert_eq!(
        playlist.tracks,
        vec![
            Track {
                artist: "Broadcast".to_string(),
                track: "Tears in the Typing Pool".to_string(),
                is_single: false,
                album: "Tender Buttons".to_string(),
                is_new: false,
            },
            Track {
                artist: "Home Recording".to_string(),
                track: "demo.mp3".to_string(),
                is_single: false,
                album: "Local Files".to_string(),
                is_new: false,
            },
            Track {
                artist: String::new(),
                track: "Episode 12".to_string(),
                is_single: false,
                album: String::new(),
                is_new: false,
            },
        ]
    );
}

#[tokio::test]
async fn test_undecodable_body_is_internal_error() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let track = spotify.track("garbled").await.unwrap_err();
    let album = spotify.album("garbled").await.unwrap_err();
    let playlist = spotify.playlist("garbled").await.unwrap_err();

    for error in [track, album, playlist] {
        assert!(matches!(error, ProviderError::Internal(_)), "{:?}", error);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn test_failing_album_page_discards_earlier_tracks() {
    let fake = FakeSpotify::start().await;
    let spotify = provider(&fake);

    let result = spotify.album("partial").await;

    assert_eq!(
        result,
        Err(ProviderError::NotFound {
            kind: LookupKind::Album,
            identifier: "partial".to_string(),
        })
    );
    // album container plus the missing track page
    assert_eq!(fake.api_requests(), 2);
}
