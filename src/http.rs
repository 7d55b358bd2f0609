//! Just enough HTTP/1.1 to serve the mock endpoints: an incremental
//! request reader bounded by `Content-Length` and a response writer
//! that always closes the connection.

use std::collections::HashMap;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// A parsed inbound request. Built per connection and discarded once
/// the response has been written.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct Response {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    /// Serialize `value` into a 200 JSON response. A serialization
    /// failure while building the body degrades to the error envelope.
    pub fn ok_json<T: serde::Serialize>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status: 200,
                content_type: "application/json",
                body,
            },
            Err(err) => Self::error(&err.to_string()),
        }
    }

    /// The uniform failure envelope: 500 with `{"error": <message>}`.
    pub fn error(message: &str) -> Self {
        Self {
            status: 500,
            content_type: "application/json",
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    pub fn not_found(body: &str) -> Self {
        Self {
            status: 404,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub async fn write_to(&self, stream: &mut TcpStream) -> std::io::Result<()> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            status_reason(self.status),
            self.content_type,
            self.body.len()
        );
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&self.body).await
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read one request off the stream: accumulate until the blank line
/// ending the head, then until `Content-Length` body bytes are in.
/// Returns `None` when the peer closes before sending a full head.
pub async fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<Request>> {
    let mut buffer = Vec::new();
    let mut temp = [0u8; 1024];
    let mut head: Option<(usize, ParsedHead)> = None;

    loop {
        let n = stream.read(&mut temp).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);

        if head.is_none() {
            if let Some(end) = find_head_end(&buffer) {
                head = Some((end, parse_head(&buffer[..end])));
            }
        }

        if let Some((end, ref parsed)) = head {
            if buffer.len() >= end + parsed.content_length {
                break;
            }
        }
    }

    let (end, parsed) = match head {
        Some(head) => head,
        None => return Ok(None),
    };

    let body = if buffer.len() >= end + parsed.content_length {
        buffer[end..end + parsed.content_length].to_vec()
    } else {
        Vec::new()
    };

    Ok(Some(Request {
        method: parsed.method,
        path: parsed.path,
        headers: parsed.headers,
        body,
    }))
}

fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

struct ParsedHead {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    content_length: usize,
}

fn parse_head(buffer: &[u8]) -> ParsedHead {
    let head = String::from_utf8_lossy(buffer);
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    let mut content_length = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let key = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if key == "content-length" {
                content_length = value.parse().unwrap_or(0);
            }
            headers.insert(key, value);
        }
    }

    ParsedHead {
        method,
        path,
        headers,
        content_length,
    }
}
