//! Minimal in-process API double: accepts one request per connection,
//! routes on decoded path + query, answers with canned JSON.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub type MockResponse = (&'static str, Value);
pub type Handler = dyn Fn(&str, &HashMap<String, String>) -> Option<MockResponse> + Send + Sync;

pub fn ok(body: Value) -> Option<MockResponse> {
    Some(("200 OK", body))
}

/// A single-page collection envelope with no trailing cursor.
pub fn page(collection: &str, items: Value) -> Value {
    let mut body = json!({"meta": {"cursors": {"after": null}}});
    body[collection] = items;
    body
}

pub fn data_removed() -> Option<MockResponse> {
    Some((
        "410 Gone",
        json!({
            "error": {
                "type": "invalid_api_usage",
                "message": "The related customer data has been removed",
                "errors": [{"reason": "customer_data_removed"}],
                "documentation_url": "https://docs.paysync.dev/errors",
            },
        }),
    ))
}

pub struct MockApi {
    pub base_url: String,
}

impl MockApi {
    pub async fn start(handler: Arc<Handler>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                let handler = handler.clone();
                tokio::spawn(respond(socket, handler));
            }
        });
        Self {
            base_url: format!("http://{addr}"),
        }
    }
}

async fn respond(mut socket: tokio::net::TcpStream, handler: Arc<Handler>) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 2048];
    loop {
        let Ok(n) = socket.read(&mut tmp).await else {
            return;
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    let (path, query) = parse_target(&target);
    let (status, body) = match handler(&path, &query) {
        Some((status, body)) => (status, body.to_string()),
        None => (
            "404 Not Found",
            json!({
                "error": {
                    "type": "invalid_api_usage",
                    "message": format!("no route for {path}"),
                    "documentation_url": "https://docs.paysync.dev/errors",
                },
            })
            .to_string(),
        ),
    };
    let message = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(message.as_bytes()).await;
}

fn parse_target(target: &str) -> (String, HashMap<String, String>) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(percent_decode(key), percent_decode(value));
    }
    (path.to_string(), params)
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(bytes[i]);
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
