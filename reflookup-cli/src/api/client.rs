use async_trait::async_trait;
use log::{debug, warn};

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::lookup::{ResultItem, parse_result_items};

/// Search endpoint used by the direct strategy
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// GET a fully built search url and decode the result list
    async fn search(&self, url: &str) -> Result<Vec<ResultItem>, LookupError>;
}

/// reqwest-backed search client
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
}

impl HttpSearchClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, url: &str) -> Result<Vec<ResultItem>, LookupError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_result_items(&body)
    }
}

/// Run a query and normalize every failure to an empty result list
pub async fn fetch_results(client: &dyn SearchClient, url: &str) -> Vec<ResultItem> {
    match client.search(url).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Lookup query failed, showing no results: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    struct FailingClient(fn() -> LookupError);

    #[async_trait]
    impl SearchClient for FailingClient {
        async fn search(&self, _url: &str) -> Result<Vec<ResultItem>, LookupError> {
            Err((self.0)())
        }
    }

    #[tokio::test]
    async fn test_failures_normalize_to_empty() {
        for make in [
            (|| LookupError::Status(500)) as fn() -> LookupError,
            || LookupError::Decode("expected an array, got null".to_string()),
        ] {
            let client = FailingClient(make);
            assert!(fetch_results(&client, "/api/postcodes?code=").await.is_empty());
        }
    }

    /// Serve one canned HTTP response on a local port; yields the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_http_client_decodes_results() {
        let (base, request) =
            serve_once("200 OK", r#"[{"id": 7, "code": "3000", "name": "Rotterdam"}]"#).await;
        let client = HttpSearchClient::new(&LookupConfig::default()).unwrap();

        let items = client.search(&format!("{}/api/postcodes?code=30", base)).await.unwrap();
        assert_eq!(items, vec![ResultItem::new(Some("7"), Some("3000"), Some("Rotterdam"))]);

        let head = request.await.unwrap();
        assert!(head.starts_with("GET /api/postcodes?code=30 HTTP/1.1"));
        assert!(head.to_ascii_lowercase().contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_http_client_reports_status() {
        let (base, _request) = serve_once("500 Internal Server Error", "oops").await;
        let client = HttpSearchClient::new(&LookupConfig::default()).unwrap();
        let url = format!("{}/api/postcodes?code=", base);

        let result = client.search(&url).await;
        assert!(matches!(result, Err(LookupError::Status(500))));
    }

    #[tokio::test]
    async fn test_http_client_malformed_body_normalizes_to_empty() {
        let (base, _request) = serve_once("200 OK", r#"{"not": "a list"}"#).await;
        let client = HttpSearchClient::new(&LookupConfig::default()).unwrap();
        let url = format!("{}/api/postcodes?code=", base);

        assert!(fetch_results(&client, &url).await.is_empty());
    }
}
