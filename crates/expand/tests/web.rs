//! Web resolution behavior against a local HTTP stub.
//!
//! A plain `TcpListener` thread serves a three-level site
//! (parent → child → grandchild) so the depth bound, the relative-link
//! rebuild, and the child provenance headers can be observed without
//! touching the network.

use promptloom_expand::web_resolver;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};

// ── HTTP stub ────────────────────────────────────────────────────────────

/// Start a stub site on an ephemeral port and return the port.
///
/// Pages: `/` links to `/child` (relative), `/` (self), and an
/// off-origin absolute URL; `/child` links to `/grand`; `/grand` is a
/// leaf.
fn serve_site() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream);
        }
    });
    port
}

fn handle(mut stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain the remaining headers; GET requests carry no body.
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let body = match path {
        "/" => concat!(
            "<html><body><p>parent text</p>",
            r#"<a href="/child">child</a>"#,
            r#"<a href="/">self</a>"#,
            r#"<a href="https://elsewhere.invalid/x">off-origin</a>"#,
            "</body></html>"
        ),
        "/child" => concat!(
            "<html><body><p>child text</p>",
            r#"<a href="/grand">grand</a>"#,
            "</body></html>"
        ),
        "/grand" => "<html><body><p>grand text</p></body></html>",
        _ => "",
    };
    let status = if body.is_empty() { "404 Not Found" } else { "200 OK" };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn depth_one_fetches_only_the_page_itself() {
    let port = serve_site();
    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::new();

    let out = web_resolver::resolve(&client, &url, 1).await.unwrap();
    assert!(out.contains("parent text"));
    assert!(!out.contains("child text"));
    assert!(!out.contains("grand text"));
}

#[tokio::test]
async fn depth_two_appends_children_with_url_headers() {
    let port = serve_site();
    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::new();

    let out = web_resolver::resolve(&client, &url, 2).await.unwrap();
    assert!(out.contains("parent text"));
    assert!(out.contains("child text"));
    assert!(!out.contains("grand text"));

    // The relative link is rebuilt to an absolute URL and used as the
    // child's provenance header.
    let child_url = format!("http://127.0.0.1:{port}/child");
    assert_eq!(out.matches(&format!("\n\n{child_url}:\n\n")).count(), 1);

    // The bare root link is skipped, so the parent is fetched once.
    assert_eq!(out.matches("parent text").count(), 1);
}

#[tokio::test]
async fn depth_three_reaches_grandchildren() {
    let port = serve_site();
    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::new();

    let out = web_resolver::resolve(&client, &url, 3).await.unwrap();
    assert!(out.contains("parent text"));
    assert!(out.contains("child text"));
    assert!(out.contains("grand text"));

    let grand_url = format!("http://127.0.0.1:{port}/grand");
    assert!(out.contains(&format!("\n\n{grand_url}:\n\n")));
}
