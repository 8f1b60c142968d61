#![allow(dead_code)]

use async_trait::async_trait;
use feed_relay::{FeedSource, RelayError, Result, Translator};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// In-memory feed source keyed by URL. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticSource {
    documents: HashMap<String, Vec<u8>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }
}

#[async_trait]
impl FeedSource for StaticSource {
    async fn fetch(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        self.documents.get(url).cloned().ok_or_else(|| RelayError::Status {
            label: label.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}

/// Uppercases text and counts calls.
#[derive(Default)]
pub struct ShoutingTranslator {
    pub calls: AtomicUsize,
}

impl ShoutingTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for ShoutingTranslator {
    fn translator_name(&self) -> String {
        "shouting".to_string()
    }

    async fn translate(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(text.to_uppercase())
    }
}

pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    fn translator_name(&self) -> String {
        "failing".to_string()
    }

    async fn translate(&self, _text: &str) -> Result<String> {
        Err(RelayError::Translation("quota exceeded".to_string()))
    }
}

pub fn rss_document(items: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
<title>Upstream</title>
<link>https://example.org/</link>
<description>Upstream feed</description>
"#,
    );
    for (title, link, pub_date, encoded) in items {
        body.push_str(&format!(
            r#"<item>
<title>{}</title>
<link>{}</link>
<guid isPermaLink="false">{}</guid>
<pubDate>{}</pubDate>
<category><![CDATA[Releases]]></category>
<description><![CDATA[<p>Summary of {}</p>]]></description>
<content:encoded><![CDATA[{}]]></content:encoded>
</item>
"#,
            title, link, link, pub_date, title, encoded
        ));
    }
    body.push_str("</channel>\n</rss>\n");
    body
}

/// Serve one canned HTTP response per connection on 127.0.0.1, in order.
///
/// Returns the base URL and a counter of requests received.
pub async fn serve_responses(responses: Vec<(&'static str, String)>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        for (status_line, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), hits)
}

async fn read_request(socket: &mut TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while request.len() < header_end + content_length {
        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);
    }
}
