//! Scripted HTTP/1.1 server on a local listener for client tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

pub const TOKEN_PATH: &str = "/token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Header names are lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct Script {
    token: VecDeque<(u16, String)>,
    report: VecDeque<(u16, String)>,
}

impl Script {
    /// Next scripted reply; the last one repeats once the script runs out.
    fn next(queue: &mut VecDeque<(u16, String)>) -> (u16, String) {
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or((500, r#"{"error":"unscripted"}"#.to_string()))
        }
    }
}

pub struct MockServer {
    base_url: Url,
    script: Arc<Mutex<Script>>,
    token_hits: Arc<AtomicU32>,
    report_hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to ephemeral port");
        let addr = listener.local_addr().expect("get local addr");

        let script = Arc::new(Mutex::new(Script::default()));
        let token_hits = Arc::new(AtomicU32::new(0));
        let report_hits = Arc::new(AtomicU32::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let script = script.clone();
            let token_hits = token_hits.clone();
            let report_hits = report_hits.clone();
            let requests = requests.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((mut stream, _)) = listener.accept().await else {
                        return;
                    };
                    let Ok(request) = read_request(&mut stream).await else {
                        continue;
                    };

                    let (status, body) = {
                        let mut script = script.lock().unwrap();
                        if request.path == TOKEN_PATH {
                            token_hits.fetch_add(1, Ordering::SeqCst);
                            Script::next(&mut script.token)
                        } else {
                            report_hits.fetch_add(1, Ordering::SeqCst);
                            Script::next(&mut script.report)
                        }
                    };
                    requests.lock().unwrap().push(request);
                    let _ = write_response(&mut stream, status, &body).await;
                }
            })
        };

        Self {
            base_url: Url::parse(&format!("http://{}/", addr)).unwrap(),
            script,
            token_hits,
            report_hits,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn token_uri(&self) -> String {
        self.base_url.join(TOKEN_PATH).unwrap().to_string()
    }

    pub fn push_token(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .token
            .push_back((status, body.to_string()));
    }

    pub fn push_report(&self, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .report
            .push_back((status, body.to_string()));
    }

    pub fn token_hits(&self) -> u32 {
        self.token_hits.load(Ordering::SeqCst)
    }

    pub fn report_hits(&self) -> u32 {
        self.report_hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let path = lines
        .next()
        .and_then(|line| line.split(' ').nth(1))
        .unwrap_or_default()
        .to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Ok(RecordedRequest {
        path,
        headers,
        body,
    })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
