//! Local HTTP server for provider tests

#![allow(dead_code)]

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::mpsc::{self, Receiver},
    thread,
};

/// One request as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// e.g. `GET /points/48.7519,-122.4787`
    pub request: String,
    pub user_agent: Option<String>,
}

/// Canned answers served in order, one per connection.
pub struct TestServer {
    pub base_url: String,
    requests: Receiver<Recorded>,
}

impl TestServer {
    /// `responses` receives the server's base URL so bodies can link back to it.
    pub fn start<F>(responses: F) -> Self
    where
        F: FnOnce(&str) -> Vec<(&'static str, String)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let responses = responses(&base_url);
        let (tx, requests) = mpsc::channel();

        thread::spawn(move || {
            for (status_line, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(recorded) = read_request(&mut stream) {
                    let _ = tx.send(recorded);
                }
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { base_url, requests }
    }

    /// Answers a single request.
    pub fn once(status_line: &'static str, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| vec![(status_line, body)])
    }

    /// Requests answered so far, in arrival order.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.try_iter().collect()
    }
}

fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&raw);
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let request = request_line.rsplit_once(' ').map_or(request_line, |(rest, _)| rest).to_string();

    let user_agent = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent").then(|| value.trim().to_string())
    });

    Some(Recorded { request, user_agent })
}
