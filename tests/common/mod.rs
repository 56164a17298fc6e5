//! One-shot HTTP stub for exercising the ENTSO-E client offline.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const NS: &str = "urn:iec62325.351:tc57wg16:451-6:generationloaddocument:3:0";

pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    /// Serve exactly one request with `status` and `body`, then close.
    pub fn respond_once(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");

            let head = String::from_utf8_lossy(&head).into_owned();
            head.lines().next().unwrap_or_default().to_string()
        });

        Self { base_url, handle }
    }

    /// The request line received, e.g. `GET /api?... HTTP/1.1`.
    pub fn request_line(self) -> String {
        self.handle.join().expect("stub thread")
    }
}

pub fn load_document(start: &str, resolution: &str, points: &[(u32, f64)]) -> String {
    let mut body = format!("<GL_MarketDocument xmlns=\"{NS}\"><TimeSeries><Period>");
    body.push_str(&format!(
        "<timeInterval><start>{start}</start></timeInterval><resolution>{resolution}</resolution>"
    ));
    for (position, quantity) in points {
        body.push_str(&format!(
            "<Point><position>{position}</position><quantity>{quantity}</quantity></Point>"
        ));
    }
    body.push_str("</Period></TimeSeries></GL_MarketDocument>");
    body
}
