#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use issue_desk::{build_client, ClientConfig, Navigator};
use reqwest::Url;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_mock_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server listener");
    let address: SocketAddr = listener.local_addr().expect("mock listener local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("run mock server");
    });
    format!("http://{address}")
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let address = listener.local_addr().expect("throwaway listener addr");
    drop(listener);
    format!("http://{address}")
}

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, "test-client-id").expect("valid test config")
}

pub fn http_client() -> reqwest::Client {
    build_client().expect("build http client")
}

pub fn issue_json(number: u64, title: &str, priority: Option<&str>) -> Value {
    let day = number % 28 + 1;
    json!({
        "id": 5000 + number,
        "number": number,
        "title": title,
        "body": "",
        "state": "open",
        "created_at": format!("2024-05-{:02}T09:00:00Z", day),
        "updated_at": format!("2024-05-{:02}T12:00:00Z", day),
        "labels": [{ "name": "T: Bug", "color": "d73a4a" }],
        "priority": priority,
        "type": "Bug",
        "client": null,
        "assignee": null,
        "html_url": format!("https://github.com/acme/tracker/issues/{}", number)
    })
}

/// An issue exactly as the GitHub REST API returns it, extra fields included.
pub fn github_issue_json(number: u64, title: &str) -> Value {
    let day = number % 28 + 1;
    json!({
        "url": format!("https://api.github.com/repos/acme/tracker/issues/{}", number),
        "repository_url": "https://api.github.com/repos/acme/tracker",
        "comments_url": format!(
            "https://api.github.com/repos/acme/tracker/issues/{}/comments",
            number
        ),
        "html_url": format!("https://github.com/acme/tracker/issues/{}", number),
        "id": 7000 + number,
        "node_id": "I_kwDOAbCdEf",
        "number": number,
        "title": title,
        "user": { "login": "octocat", "id": 583231, "type": "User" },
        "labels": [{
            "id": 208045946,
            "node_id": "MDU6TGFiZWwyMDgwNDU5NDY=",
            "url": "https://api.github.com/repos/acme/tracker/labels/bug",
            "name": "bug",
            "description": "Something isn't working",
            "color": "d73a4a",
            "default": true
        }],
        "state": "open",
        "locked": false,
        "assignee": { "login": "hubot", "id": 2, "type": "User" },
        "assignees": [{ "login": "hubot", "id": 2, "type": "User" }],
        "milestone": null,
        "comments": 0,
        "created_at": format!("2024-06-{:02}T09:00:00Z", day),
        "updated_at": format!("2024-06-{:02}T10:00:00Z", day),
        "closed_at": null,
        "author_association": "OWNER",
        "body": "Steps to reproduce"
    })
}

/// Answer the first request with `status_line` and a body cut short of its
/// declared length, then hang up.
pub async fn spawn_truncated_response(status_line: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncating listener");
    let address = listener.local_addr().expect("truncating listener addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept request");
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 200\r\nConnection: close\r\n\r\n{{\"message\":",
            status_line
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{address}")
}

/// Shared log of what a mock endpoint saw.
#[derive(Clone)]
pub struct Recorder<T: Clone> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> Recorder<T> {
    pub fn push(&self, entry: T) {
        self.entries.lock().expect("recorder lock").push(entry);
    }

    pub fn entries(&self) -> Vec<T> {
        self.entries.lock().expect("recorder lock").clone()
    }
}

#[derive(Default)]
pub struct MockNavigator {
    calls: Mutex<Vec<Url>>,
}

impl MockNavigator {
    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().expect("navigator lock").clone()
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, url: &Url) {
        self.calls.lock().expect("navigator lock").push(url.clone());
    }
}
