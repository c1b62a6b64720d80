//! In-process stand-in for the Walk Report server.
//!
//! Accepts plain HTTP/1.1 on a loopback port, records every request and
//! answers with whatever the test's responder returns.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Received {
    /// `filename="..."` of the first multipart part.
    pub fn filename(&self) -> Option<String> {
        let body = String::from_utf8_lossy(&self.body);
        let start = body.find("filename=\"")? + "filename=\"".len();
        let end = body[start..].find('"')? + start;
        Some(body[start..end].to_string())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Received>>>,
}

impl MockServer {
    pub fn start<F>(responder: F) -> MockServer
    where
        F: Fn(&Received) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Binding error");
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                if let Some(req) = read_request(&stream) {
                    let (status, body) = responder(&req);
                    recorded.lock().unwrap().push(req);
                    write_response(stream, status, &body);
                }
            }
        });

        MockServer { url, requests }
    }

    /// Server that answers every upload with a 200 echoing the file name.
    pub fn accepting() -> MockServer {
        MockServer::start(|req| {
            let name = req.filename().unwrap_or_default();
            let body = format!(
                r#"{{"success":true,"filename":"1700000000000-{name}","originalName":"{name}","size":{},"path":"/uploads/1700000000000-{name}"}}"#,
                req.body.len()
            );
            (200, body)
        })
    }

    pub fn requests(&self) -> Vec<Received> {
        self.requests.lock().unwrap().clone()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(Received::filename)
            .collect()
    }
}

/// A base URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn read_request(stream: &TcpStream) -> Option<Received> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = None;
    let mut chunked = false;
    let mut content_type = String::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        let value = value.trim();
        match name.to_ascii_lowercase().as_str() {
            "content-length" => content_length = value.parse::<usize>().ok(),
            "transfer-encoding" => chunked = value.eq_ignore_ascii_case("chunked"),
            "content-type" => content_type = value.to_string(),
            _ => {}
        }
    }

    let mut body = Vec::new();
    if let Some(len) = content_length {
        body.resize(len, 0);
        reader.read_exact(&mut body).ok()?;
    } else if chunked {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).ok()?;
            let size = usize::from_str_radix(size_line.trim(), 16).ok()?;
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).ok()?;
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    Some(Received {
        method,
        path,
        content_type,
        body,
    })
}

fn write_response(mut stream: TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let content_type = if status == 200 {
        "application/json"
    } else {
        "text/plain"
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
