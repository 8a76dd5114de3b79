use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use media::CloudinaryHost;
use routes::*;
use service::AstrologerService;
use store::MemoryStore;

mod config;
mod media;
mod models;
mod routes;
mod service;
mod store;
mod utils;

pub struct AppState {
    pub env: Config,
    pub service: AstrologerService,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let env = Config::init();
    let media = CloudinaryHost::new(&env).unwrap();
    let service = AstrologerService::new(Arc::new(MemoryStore::new()), Arc::new(media));

    let addr_str = format!("{}:{}", env.server_address, env.server_port);
    let app_state = Arc::new(AppState { env, service });

    let app = Router::new()
        .route("/api/status", get(get_status))
        .route(
            "/api/astrologers",
            get(get_all_astrologers).post(post_add_astrologer),
        )
        .route("/api/astrologers/upload-image", post(post_upload_image))
        .route("/api/astrologers/search/:search", get(search_astrologers))
        .route(
            "/api/astrologers/:id",
            get(get_astrologer_details)
                .patch(patch_update_astrologer)
                .delete(delete_astrologer),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = addr_str.parse::<SocketAddr>().unwrap();
    tracing::debug!("listening on: {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
