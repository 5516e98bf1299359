//! Client for the login/register REST backend and the persisted session.

use crate::error::{PosError, PosResult};
use crate::models::Employee;
use crate::store::employees;
use crate::validation;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginResponse {
    pub user: AuthUser,
    pub token: String,
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> PosResult<LoginResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(PosError::validation("Please complete all fields"));
        }

        let url = format!("{}/login", self.base_url);
        tracing::info!(email = %request.email, "logging in");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(api_error(response, "Error signing in").await);
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| PosError::Auth(format!("Unexpected login response: {}", e)))
    }

    pub async fn register(&self, request: &RegisterRequest) -> PosResult<()> {
        validation::required("Name", &request.name)?;
        validation::required("Email", &request.email)?;
        validation::required("Password", &request.password)?;

        let url = format!("{}/register", self.base_url);
        tracing::info!(email = %request.email, "registering user");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(api_error(response, "Error registering").await);
        }

        Ok(())
    }
}

fn network_error(e: reqwest::Error) -> PosError {
    tracing::warn!(error = %e, "backend unreachable");
    PosError::Network("Could not connect to the server".to_string())
}

async fn api_error(response: reqwest::Response, fallback: &str) -> PosError {
    let status = response.status();
    let message = response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(%status, %message, "backend rejected request");
    PosError::Auth(message)
}

/// The signed-in user and the backend token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    pub user: AuthUser,
    pub token: String,
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Session {
            user: r.user,
            token: r.token,
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn save(&self, session: &Session) -> PosResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string(session)?)?;
        Ok(())
    }

    /// A corrupt session file counts as signed out.
    pub fn load(&self) -> PosResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> PosResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// The employee whose email matches the signed-in user, if any.
pub fn authenticated_employee(conn: &Connection, session: &Session) -> PosResult<Option<Employee>> {
    employees::find_employee_by_email(conn, &session.user.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve exactly one request with a canned response; returns the base URL.
    fn one_shot_server(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/api", addr)
    }

    fn client(base: String) -> ApiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::with_http(http, base)
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "ana@shop.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn login_returns_user_and_token() {
        let base = one_shot_server(
            "200 OK",
            r#"{"user":{"id":7,"name":"Ana","email":"ana@shop.com"},"token":"abc"}"#,
        );

        let response = client(base).login(&login_request()).await.unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(response.user.id, Some(7));
        assert_eq!(response.user.name, "Ana");
    }

    #[tokio::test]
    async fn login_failure_uses_backend_message() {
        let base = one_shot_server("401 Unauthorized", r#"{"message":"Credenciales inválidas"}"#);

        let err = client(base).login(&login_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Credenciales inválidas");
    }

    #[tokio::test]
    async fn register_failure_without_message_uses_default() {
        let base = one_shot_server("422 Unprocessable Entity", "{}");

        let request = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@shop.com".to_string(),
            password: "secret".to_string(),
        };
        let err = client(base).register(&request).await.unwrap_err();
        assert!(matches!(err, PosError::Auth(ref m) if m == "Error registering"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = client(format!("http://127.0.0.1:{}/api", port))
            .login(&login_request())
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Network(_)));
    }

    #[tokio::test]
    async fn empty_fields_never_hit_the_network() {
        let err = client("http://127.0.0.1:9/api".to_string())
            .login(&LoginRequest {
                email: String::new(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Validation(_)));
    }

    #[test]
    fn session_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), None);

        let session = Session {
            user: AuthUser {
                id: Some(1),
                name: "Ana".to_string(),
                email: "ana@shop.com".to_string(),
            },
            token: "t".to_string(),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_session_counts_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(SessionStore::new(path).load().unwrap(), None);
    }
}
