use std::sync::Arc;
use std::time::Duration;

use auth::Argon2Verifier;
use auth::CredentialVerifier;
use auth::InMemorySessionStore;
use auth::JwtSessionStrategy;
use auth::SessionSettings;
use auth::SessionStore;
use session_service::domain::session::service::SessionService;
use session_service::domain::user::models::EmailAddress;
use session_service::domain::user::models::User;
use session_service::inbound::http::router::create_router;
use session_service::inbound::http::router::CookieSettings;
use session_service::outbound::repositories::InMemoryUserDirectory;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory collaborators
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemorySessionStore>,
    /// Client that keeps cookies between requests
    pub browser: reqwest::Client,
    /// Client that never sends cookies
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemorySessionStore::new());
        let session_store: Arc<dyn SessionStore> = Arc::clone(&store) as Arc<dyn SessionStore>;

        let settings = SessionSettings {
            token_ttl: Duration::from_secs(3600),
            store_timeout: Duration::from_secs(1),
        };
        let strategy = Arc::new(
            JwtSessionStrategy::new(SECRET, session_store, settings)
                .expect("Failed to build token strategy"),
        );

        let directory = InMemoryUserDirectory::new();
        directory.insert(User {
            email: EmailAddress::new(EMAIL.to_string()).unwrap(),
            username: "alice".to_string(),
            password_hash: Argon2Verifier::new()
                .hash(PASSWORD)
                .expect("Failed to hash password"),
        });

        let session_service = Arc::new(SessionService::new(Arc::new(directory), strategy));

        let cookie = CookieSettings {
            name: "token".to_string(),
            domain: None,
            secure: false,
            max_age: settings.token_ttl,
        };

        let router = create_router(session_service, cookie);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            browser: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            api_client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Log in through the API and return the issued token
    pub async fn login(&self, client: &reqwest::Client) -> String {
        let response = client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({
                "email": EMAIL,
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path)).bearer_auth(token)
    }
}
