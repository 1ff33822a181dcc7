use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::roster_file;
use crate::roster::{parse_roster, FetchError, RosterEntry};

/// Where rosters come from. One call fetches one entity's roster.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch(&self, code: &str) -> Result<Vec<RosterEntry>, FetchError>;

    /// Human readable location, used in logs and the status bar.
    fn describe(&self) -> String;
}

/// Fetches `<base_url>/<file>` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRosterSource {
    client: Client,
    base_url: String,
}

impl HttpRosterSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url_for(&self, code: &str) -> Result<String, FetchError> {
        let file = roster_file(code).ok_or_else(|| FetchError::UnknownEntity(code.to_string()))?;
        Ok(format!("{}/{file}", self.base_url.trim_end_matches('/')))
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn fetch(&self, code: &str) -> Result<Vec<RosterEntry>, FetchError> {
        let url = self.url_for(code)?;
        tracing::debug!(%url, "fetching roster");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        parse_roster(&body)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads `<dir>/<file>` from the local filesystem.
#[derive(Debug, Clone)]
pub struct DirRosterSource {
    dir: PathBuf,
}

impl DirRosterSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, code: &str) -> Result<PathBuf, FetchError> {
        let file = roster_file(code).ok_or_else(|| FetchError::UnknownEntity(code.to_string()))?;
        Ok(self.dir.join(file))
    }
}

#[async_trait]
impl RosterSource for DirRosterSource {
    async fn fetch(&self, code: &str) -> Result<Vec<RosterEntry>, FetchError> {
        let path = self.path_for(code)?;
        tracing::debug!(path = %path.display(), "reading roster");

        let bytes = tokio::fs::read(&path).await?;
        parse_roster(&bytes)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// `http://` and `https://` locations are fetched remotely, anything else is a directory.
pub fn source_from_location(
    location: &str,
    timeout: Duration,
) -> Result<Arc<dyn RosterSource>, FetchError> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpRosterSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(DirRosterSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn http_urls_join_base_and_mapped_file() -> Result<(), FetchError> {
        let source = HttpRosterSource::new("https://example.org/data/", Duration::from_secs(1))?;
        assert_eq!(source.url_for("us")?, "https://example.org/data/usa.csv");
        assert!(matches!(
            source.url_for("xx"),
            Err(FetchError::UnknownEntity(code)) if code == "xx"
        ));
        Ok(())
    }

    #[test]
    fn location_picks_source_kind() -> Result<(), FetchError> {
        let remote = source_from_location("https://example.org/data", Duration::from_secs(1))?;
        let local = source_from_location("./data", Duration::from_secs(1))?;

        assert_eq!(remote.describe(), "https://example.org/data");
        assert_eq!(local.describe(), "./data");
        Ok(())
    }

    /// Serves one canned HTTP response per connection and returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> std::io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        });

        Ok(format!("http://{addr}/rosters"))
    }

    #[tokio::test]
    async fn http_source_parses_successful_response() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve_once("200 OK", "Aircraft,Type\nRafale F4,Multirole\n").await?;
        let source = HttpRosterSource::new(base, Duration::from_secs(5))?;

        let roster = source.fetch("fr").await?;

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].aircraft.as_deref(), Some("Rafale F4"));
        Ok(())
    }

    #[tokio::test]
    async fn http_source_maps_error_status() -> Result<(), Box<dyn std::error::Error>> {
        let base = serve_once("404 Not Found", "missing").await?;
        let source = HttpRosterSource::new(base.clone(), Duration::from_secs(5))?;

        match source.fetch("us").await {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert_eq!(url, format!("{base}/usa.csv"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn http_source_honours_client_timeout() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        // Accept and hold the connection without answering
        let server = tokio::spawn(async move {
            let held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(held);
        });

        let source = HttpRosterSource::new(format!("http://{addr}"), Duration::from_millis(100))?;
        match source.fetch("de").await {
            Err(FetchError::Http(error)) => assert!(error.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }

        server.abort();
        Ok(())
    }

    #[tokio::test]
    async fn directory_source_reads_mapped_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("fra.csv"),
            "Aircraft,Type,In Service\nRafale F4,Multirole,36\n",
        )?;

        let source = DirRosterSource::new(dir.path());
        let roster = source.fetch("fr").await?;

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].aircraft.as_deref(), Some("Rafale F4"));
        Ok(())
    }

    #[tokio::test]
    async fn directory_source_reports_missing_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let source = DirRosterSource::new(dir.path());

        let result = source.fetch("de").await;
        assert!(matches!(result, Err(FetchError::Io(_))));
        Ok(())
    }
}
