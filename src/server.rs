use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, middleware, routing::get};

use crate::{
    Res, api,
    api::CapabilityIndex,
    debug, info,
    provider::{Capabilities, Provider},
    success,
    types::LookupKind,
    warning,
};

/// Route path of one provider lookup, e.g. `/spotify/album/{*identifier}`.
///
/// The catch-all parameter accepts identifiers containing slashes.
pub fn lookup_path(provider: &str, kind: LookupKind) -> String {
    format!("/{}/{}/{{*identifier}}", provider, kind.as_str())
}

/// Builds the service router.
///
/// Every provider is asked once for its [`Capabilities`]; only the lookups it
/// declares get a route. A provider without any lookup, or one whose identifier
/// is already taken, registers nothing.
pub fn build_router(providers: &[Arc<dyn Provider>]) -> Router {
    let mut router = Router::new();
    let mut index = CapabilityIndex::new();

    for provider in providers {
        let id = provider.identifier().to_string();
        if index.contains_key(&id) {
            warning!("Provider '{}' is already registered, skipping", id);
            continue;
        }

        let capabilities = Arc::clone(provider).capabilities();
        if capabilities.is_empty() {
            warning!("Provider '{}' supports no lookups, no routes registered", id);
        }

        router = register_lookups(router, &id, &capabilities);
        let names = capabilities
            .kinds()
            .into_iter()
            .map(LookupKind::as_str)
            .collect::<Vec<_>>();
        debug!("Provider '{}' serves: {}", id, names.join(", "));
        index.insert(id, names);
    }

    router
        .route("/healthz", get(api::healthz))
        .route(
            "/capabilities",
            get(api::capabilities).layer(Extension(Arc::new(index))),
        )
        .layer(middleware::from_fn(api::cors))
}

fn register_lookups(mut router: Router, id: &str, capabilities: &Capabilities) -> Router {
    if let Some(lookup) = capabilities.playlist.clone() {
        router = router.route(
            &lookup_path(id, LookupKind::Playlist),
            api::lookup_route(move |identifier: String| {
                let lookup = Arc::clone(&lookup);
                async move { lookup.playlist(&identifier).await }
            }),
        );
    }

    if let Some(lookup) = capabilities.album.clone() {
        router = router.route(
            &lookup_path(id, LookupKind::Album),
            api::lookup_route(move |identifier: String| {
                let lookup = Arc::clone(&lookup);
                async move { lookup.album(&identifier).await }
            }),
        );
    }

    if let Some(lookup) = capabilities.track.clone() {
        router = router.route(
            &lookup_path(id, LookupKind::Track),
            api::lookup_route(move |identifier: String| {
                let lookup = Arc::clone(&lookup);
                async move { lookup.track(&identifier).await }
            }),
        );
    }

    router
}

/// Serves `providers` on `0.0.0.0:<port>` until Ctrl-C.
pub async fn start_api_server(port: u16, providers: Vec<Arc<dyn Provider>>) -> Res<()> {
    let app = build_router(&providers);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    success!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warning!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
