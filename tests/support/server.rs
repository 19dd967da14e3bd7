//! Mock GitHub REST server.
//!
//! Serves the three endpoints sealpost calls on a random local port and
//! records every request. Stops when dropped.

use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use tiny_http::{Response, Server};

use sealpost::core::seal;

pub const MOCK_KEY_ID: &str = "568250167242549743";

/// Status codes and bodies the mock answers with.
#[derive(Debug, Clone)]
pub struct Routes {
    pub key_status: u16,
    /// Overrides the generated `{key_id, key}` body
    pub key_body: Option<String>,
    pub put_status: u16,
    pub dispatch_status: u16,
    /// Sleep before answering any request
    pub delay: Option<Duration>,
    /// Send status and headers at once, then stall this long mid-body
    pub body_delay: Option<Duration>,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            key_status: 200,
            key_body: None,
            put_status: 201,
            dispatch_status: 204,
            delay: None,
            body_delay: None,
        }
    }
}

/// A request as the server received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct MockGitHub {
    url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    secret_key: SecretKey,
    handle: Option<JoinHandle<()>>,
}

impl MockGitHub {
    pub fn start() -> Self {
        Self::with_routes(Routes::default())
    }

    pub fn with_routes(routes: Routes) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("failed to bind mock server"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("mock server listens on an IP address");
        let url = format!("http://{}", addr);

        let secret_key = SecretKey::generate(&mut OsRng);
        let key_body = routes.key_body.clone().unwrap_or_else(|| {
            serde_json::json!({
                "key_id": MOCK_KEY_ID,
                "key": seal::encode_public_key(&secret_key.public_key()),
            })
            .to_string()
        });

        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);

                    let recorded = Recorded {
                        method: request.method().to_string(),
                        path: request.url().to_string(),
                        headers: request
                            .headers()
                            .iter()
                            .map(|h| (h.field.to_string(), h.value.to_string()))
                            .collect(),
                        body,
                    };

                    let (status, reply) = if recorded.path.ends_with("/actions/secrets/public-key")
                    {
                        (routes.key_status, key_body.clone())
                    } else if recorded.method == "PUT" {
                        (routes.put_status, String::new())
                    } else if recorded.path.ends_with("/dispatches") {
                        (routes.dispatch_status, String::new())
                    } else {
                        (404, r#"{"message":"Not Found"}"#.to_string())
                    };
                    let reply = if status >= 400 && reply.is_empty() {
                        format!(r#"{{"message":"mock status {}"}}"#, status)
                    } else {
                        reply
                    };

                    requests.lock().expect("requests lock").push(recorded);

                    if let Some(delay) = routes.delay {
                        thread::sleep(delay);
                    }
                    let _ = match routes.body_delay {
                        Some(stall) => request.respond(stalled_response(status, reply, stall)),
                        None => request.respond(Response::from_string(reply).with_status_code(status)),
                    };
                }
            })
        };

        Self {
            url,
            server,
            requests,
            secret_key,
            handle: Some(handle),
        }
    }

    /// Base URL to pass as `--api-url`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// `METHOD path` of every request, in order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Open a sealed value uploaded to this server.
    pub fn open(&self, sealed_b64: &str) -> String {
        let plain = seal::open(&self.secret_key, sealed_b64).expect("value opens with server key");
        String::from_utf8(plain).expect("utf-8 plaintext")
    }
}

/// Leading JSON whitespace, large enough to push the headers out of the
/// server's write buffer before the stall.
const BODY_PADDING: usize = 16 * 1024;

/// Reader that sleeps once before yielding its contents.
struct Stall {
    delay: Option<Duration>,
    inner: Cursor<Vec<u8>>,
}

impl Read for Stall {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(delay) = self.delay.take() {
            thread::sleep(delay);
        }
        self.inner.read(buf)
    }
}

fn stalled_response(status: u16, body: String, stall: Duration) -> Response<impl Read> {
    let padding = Cursor::new(vec![b' '; BODY_PADDING]);
    let rest = Stall {
        delay: Some(stall),
        inner: Cursor::new(body.into_bytes()),
    };
    let length = BODY_PADDING + rest.inner.get_ref().len();

    Response::new(
        tiny_http::StatusCode(status),
        vec![tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
            .expect("valid header")],
        padding.chain(rest),
        Some(length),
        None,
    )
}

impl Drop for MockGitHub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
