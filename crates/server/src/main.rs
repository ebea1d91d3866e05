//! Atelier server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use atelier_api::{middleware::AppState, router as api_router};
use atelier_common::Config;
use atelier_core::{
    AssistantService, AuthService, BadgeService, ChatService, CreationService, FollowService,
    PostService, ProjectRequestService, UserService,
};
use atelier_db::repositories::{
    ChatRepository, CommentRepository, CreationRepository, FollowRepository, MessageRepository,
    PostLikeRepository, PostRepository, ProjectRequestRepository, UserBadgeRepository,
    UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local development: pick up .env before the config layer runs
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting atelier server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = atelier_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    atelier_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let like_repo = PostLikeRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));
    let chat_repo = ChatRepository::new(Arc::clone(&db));
    let message_repo = MessageRepository::new(Arc::clone(&db));
    let request_repo = ProjectRequestRepository::new(Arc::clone(&db));
    let creation_repo = CreationRepository::new(Arc::clone(&db));
    let badge_repo = UserBadgeRepository::new(Arc::clone(&db));

    // Initialize services
    let auth_service = AuthService::new(&config.auth);
    let assistant_service = AssistantService::new(&config.assistant);

    let user_service = UserService::new(
        user_repo.clone(),
        post_repo.clone(),
        creation_repo.clone(),
    );
    let post_service = PostService::new(
        post_repo,
        comment_repo,
        like_repo,
        follow_repo.clone(),
        user_repo.clone(),
    );
    let follow_service = FollowService::new(follow_repo, user_repo.clone());
    let chat_service = ChatService::new(chat_repo, message_repo, user_repo.clone());
    let project_request_service =
        ProjectRequestService::new(request_repo, user_repo, chat_service.clone());
    let creation_service = CreationService::new(creation_repo);
    let badge_service = BadgeService::new(badge_repo);

    // Create app state
    let state = AppState {
        auth_service,
        user_service,
        post_service,
        follow_service,
        chat_service,
        project_request_service,
        creation_service,
        badge_service,
        assistant_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            atelier_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
