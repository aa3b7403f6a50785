//! Minimal HTTP/1.1 server imitating a release feed for integration tests.
//!
//! Routes:
//! - `/latest` → 302 to `/releases/tag/<tag>`
//! - `/releases/tag/*` → 200, empty body
//! - `/download/*` → 200 with the installer body, after `failures_before_success` 500s
//! - anything else → 404

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct ReleaseServerOptions {
    pub tag: String,
    pub body: Vec<u8>,
    /// Number of download requests answered with 500 before the body is served.
    pub failures_before_success: usize,
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
}

impl Default for ReleaseServerOptions {
    fn default() -> Self {
        Self {
            tag: "v2.47.1.windows.1".to_string(),
            body: b"MZ fake installer".to_vec(),
            failures_before_success: 0,
            head_allowed: true,
        }
    }
}

pub struct ReleaseServer {
    pub base_url: String,
    download_hits: Arc<AtomicUsize>,
}

impl ReleaseServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Download requests received so far (including failed ones).
    pub fn download_hits(&self) -> usize {
        self.download_hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(opts: ReleaseServerOptions) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let opts = Arc::new(opts);
    let download_hits = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&download_hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let hits = Arc::clone(&hits);
            thread::spawn(move || handle(stream, &opts, &hits));
        }
    });
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        download_hits,
    }
}

fn handle(mut stream: std::net::TcpStream, opts: &ReleaseServerOptions, hits: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    let head = method.eq_ignore_ascii_case("HEAD");

    if head && !opts.head_allowed {
        respond(&mut stream, "405 Method Not Allowed", "", &[], true);
        return;
    }

    if path == "/latest" {
        let location = format!("Location: /releases/tag/{}\r\n", opts.tag);
        respond(&mut stream, "302 Found", &location, &[], head);
    } else if path.starts_with("/releases/tag/") {
        respond(&mut stream, "200 OK", "", &[], head);
    } else if path.starts_with("/download/") {
        let seen = hits.fetch_add(1, Ordering::SeqCst);
        if seen < opts.failures_before_success {
            respond(&mut stream, "500 Internal Server Error", "", &[], head);
        } else {
            respond(&mut stream, "200 OK", "", &opts.body, head);
        }
    } else {
        respond(&mut stream, "404 Not Found", "", &[], head);
    }
}

fn respond(
    stream: &mut std::net::TcpStream,
    status: &str,
    extra_headers: &str,
    body: &[u8],
    head: bool,
) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status,
        body.len(),
        extra_headers
    );
    let _ = stream.write_all(response.as_bytes());
    if !head {
        let _ = stream.write_all(body);
    }
}
