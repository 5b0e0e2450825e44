//! Minimal HTTP server answering canned responses, one per connection.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// A request as the server saw it.
#[derive(Debug)]
pub struct Recorded {
    /// Request line, e.g. `GET /files?pageToken=x HTTP/1.1`
    pub line: String,
    /// Header lines with lower-cased names, one per line
    pub headers: String,
    pub body: String,
}

pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl TestServer {
    /// Serve `responses` in order, then stop accepting.
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut line = String::new();
                reader.read_line(&mut line).unwrap();

                let mut headers = String::new();
                let mut content_length = 0usize;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    let header = header.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    let (name, value) = header.split_once(':').unwrap_or((header, ""));
                    let name = name.trim().to_ascii_lowercase();
                    let value = value.trim();
                    if name == "content-length" {
                        content_length = value.parse().unwrap();
                    }
                    headers.push_str(&format!("{}: {}\n", name, value));
                }

                let mut request_body = vec![0u8; content_length];
                reader.read_exact(&mut request_body).unwrap();

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();

                recorded.push(Recorded {
                    line: line.trim_end().to_string(),
                    headers,
                    body: String::from_utf8_lossy(&request_body).into_owned(),
                });
            }
            recorded
        });

        Self { base_url, handle }
    }

    /// Wait for every canned response to be served.
    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().unwrap()
    }
}
