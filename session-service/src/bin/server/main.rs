use std::sync::Arc;

use auth::Argon2Verifier;
use auth::CredentialVerifier;
use auth::InMemorySessionStore;
use auth::JwtSessionStrategy;
use auth::SessionStore;
use session_service::config::Config;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use session_service::inbound::http::router::CookieSettings;
use session_service::outbound::repositories::InMemoryUserDirectory;
use session_service::outbound::session_store::RedisSessionStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Offline helper for producing `users[].password_hash` seed values
    let args: Vec<String> = std::env::args().collect();
    if let [_, command, secret] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", Argon2Verifier::new().hash(secret)?);
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_ttl_seconds = config.session.ttl_seconds,
        store_timeout_ms = config.session.store_timeout_ms,
        seeded_users = config.users.len(),
        "Configuration loaded"
    );

    let session_store: Arc<dyn SessionStore> = match &config.redis {
        Some(redis) => {
            let store = RedisSessionStore::connect(redis).await?;
            tracing::info!(
                key_prefix = %redis.key_prefix,
                store = "redis",
                "Session store connected"
            );
            Arc::new(store)
        }
        None => {
            tracing::warn!(
                store = "memory",
                "No redis configured; sessions are local to this process"
            );
            Arc::new(InMemorySessionStore::new())
        }
    };

    // A bad secret or TTL aborts startup here
    let strategy = Arc::new(JwtSessionStrategy::new(
        config.session.secret.as_bytes(),
        session_store,
        config.session.settings(),
    )?);

    let user_directory = Arc::new(InMemoryUserDirectory::from_seeds(&config.users)?);
    if user_directory.is_empty() {
        tracing::warn!("No users seeded; every login will be rejected");
    } else {
        tracing::info!(users = user_directory.len(), "User directory seeded");
    }
    let session_service = Arc::new(SessionService::new(user_directory, strategy));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, CookieSettings::from(&config.session));

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
