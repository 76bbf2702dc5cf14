#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// A request the stub server received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub authorization: Option<String>,
}

pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: String,
}

pub fn route(path: &str, status: u16, body: impl Into<String>) -> Route {
    Route {
        path: path.to_string(),
        status,
        body: body.into(),
    }
}

/// Minimal HTTP/1.1 server standing in for the Bitbucket API.
pub struct StubServer {
    pub base: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl StubServer {
    /// `routes` receives the server's base URL so bodies can carry absolute next links.
    pub fn start(routes: impl FnOnce(&str) -> Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes = routes(&base);
        let hits = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream, &routes, &recorded);
            }
        });

        Self { base, hits }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn tasks_path(owner: &str, slug: &str, id: i64) -> String {
        format!("/repositories/{owner}/{slug}/pullrequests/{id}/tasks")
    }
}

fn handle(stream: TcpStream, routes: &[Route], hits: &Mutex<Vec<Hit>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();

    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("authorization")
        {
            authorization = Some(value.trim().to_string());
        }
    }

    hits.lock().unwrap().push(Hit {
        path: path.clone(),
        authorization,
    });

    let (status, body) = routes
        .iter()
        .find(|r| r.path == path)
        .map(|r| (r.status, r.body.as_str()))
        .unwrap_or((404, r#"{"error": "not found"}"#));
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };

    let mut stream = stream;
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
}

/// Base URL of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn task_json(id: i64, raw: &str, state: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "state": state,
        "content": { "type": "rendered", "raw": raw, "markup": "markdown", "html": "" },
        "creator": { "display_name": "Reviewer", "type": "user" },
        "created_on": "2021-03-01T10:00:00+00:00",
        "updated_on": "2021-03-01T10:00:00+00:00",
        "comment": {
            "id": id * 100,
            "links": {
                "self": { "href": format!("https://api.bitbucket.org/comments/{}", id * 100) },
                "html": { "href": format!("https://bitbucket.org/acme/widgets/pull-requests/7/_/diff#comment-{}", id * 100) }
            }
        }
    })
}

pub fn page_json(values: Vec<serde_json::Value>, next: &str) -> String {
    let size = values.len();
    serde_json::json!({
        "values": values,
        "pagelen": 25,
        "size": size,
        "page": 1,
        "next": next,
        "previous": ""
    })
    .to_string()
}

pub fn write_credentials(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("bitbucket.json");
    std::fs::write(&path, r#"{"Username": "alice", "Password": "s3cret"}"#).unwrap();
    path
}
