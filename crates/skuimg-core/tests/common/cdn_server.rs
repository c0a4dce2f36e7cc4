//! Minimal HTTP/1.1 server standing in for a CDN directory in integration tests.
//!
//! Answers HEAD (and GET) with 200 for a fixed set of paths and 404 for
//! everything else. Counts HEAD requests so tests can assert probe counts.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub struct CdnServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/files/".
    pub base_url: String,
    heads: Arc<AtomicUsize>,
}

impl CdnServer {
    pub fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. `files` are names under `/files/`
/// that exist. The server runs until the process exits.
pub fn start(files: &[&str]) -> CdnServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashSet<String>> =
        Arc::new(files.iter().map(|f| format!("/files/{f}")).collect());
    let heads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&heads);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let counter = Arc::clone(&counter);
            thread::spawn(move || handle(stream, &files, &counter));
        }
    });
    CdnServer {
        base_url: format!("http://127.0.0.1:{}/files/", port),
        heads,
    }
}

fn handle(mut stream: std::net::TcpStream, files: &HashSet<String>, heads: &AtomicUsize) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    if method.eq_ignore_ascii_case("HEAD") {
        heads.fetch_add(1, Ordering::SeqCst);
    }
    let supported = method.eq_ignore_ascii_case("HEAD") || method.eq_ignore_ascii_case("GET");
    let response: &[u8] = if !supported {
        b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    } else if files.contains(path) {
        b"HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    } else {
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    };
    let _ = stream.write_all(response);
}
