// Gene Ontology OBO retrieval (HTTP download or local file)

use crate::config::FetchConfig;
use crate::error::{GoError, Result};
use crate::progress::{create_download_progress, format_bytes};
use futures::StreamExt;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Ontology document on disk, ready to be parsed.
///
/// A downloaded document lives in a temporary file that is removed when the
/// handle is dropped.
#[derive(Debug)]
pub enum OntologyHandle {
    Local(PathBuf),
    Temporary(NamedTempFile),
}

impl OntologyHandle {
    pub fn path(&self) -> &Path {
        match self {
            OntologyHandle::Local(path) => path,
            OntologyHandle::Temporary(file) => file.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, OntologyHandle::Temporary(_))
    }
}

/// HTTP client for fetching the GO ontology
pub struct GoDownloader {
    client: Client,
    config: FetchConfig,
}

impl GoDownloader {
    pub fn new(config: FetchConfig) -> Result<Self> {
        config.validate().map_err(GoError::Validation)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(GoDownloader { client, config })
    }

    /// Locate the configured local file, or download the ontology into a
    /// temporary file
    pub async fn retrieve(&self) -> Result<OntologyHandle> {
        if let Some(local_path) = &self.config.local_ontology_path {
            let metadata = tokio::fs::metadata(local_path).await.map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!("Failed to read local ontology file '{}': {}", local_path.display(), e),
                )
            })?;

            info!(
                path = %local_path.display(),
                size = %format_bytes(metadata.len()),
                "Using local GO ontology"
            );
            return Ok(OntologyHandle::Local(local_path.clone()));
        }

        let url = self.config.ontology_url();
        info!("Downloading GO ontology from: {}", url);

        let file = self.download_with_retry(&url).await?;
        Ok(OntologyHandle::Temporary(file))
    }

    async fn download_with_retry(&self, url: &str) -> Result<NamedTempFile> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            match self.download_to_temp(url).await {
                Ok(file) => return Ok(file),
                Err(e) => {
                    warn!("Download attempt {}/{} failed: {}", attempt, self.config.max_retries, e);
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        let backoff_secs = 2u64.pow(attempt);
                        info!("Retrying in {} seconds...", backoff_secs);
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    }
                },
            }
        }

        match last_error {
            Some(err) => Err(err),
            None => Err(GoError::validation(format!(
                "Download of {} made no attempt (max_retries = {})",
                url, self.config.max_retries
            ))),
        }
    }

    /// Stream the response body into a fresh temporary file
    async fn download_to_temp(&self, url: &str) -> Result<NamedTempFile> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GoError::Http {
                status,
                url: url.to_string(),
            });
        }

        let pb = create_download_progress(response.content_length(), &format!("Downloading {}", url));

        let mut file = NamedTempFile::new()?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }
        file.flush()?;

        pb.finish_and_clear();
        info!(bytes = downloaded, size = %format_bytes(downloaded), "Downloaded GO ontology");
        debug!(path = %file.path().display(), "Ontology stored in temporary file");

        Ok(file)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = "format-version: 1.2\n\n[Term]\nid: GO:0008150\nname: biological_process\n";

    fn config_for(server: &MockServer) -> FetchConfig {
        FetchConfig::builder()
            .ontology_url(format!("{}/ontology/go-basic.obo", server.uri()))
            .timeout_secs(5)
            .build()
    }

    #[test]
    fn test_downloader_creation() {
        assert!(GoDownloader::new(FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = FetchConfig::builder().ontology_url("").build();
        assert!(matches!(GoDownloader::new(config), Err(GoError::Validation(_))));
    }

    #[tokio::test]
    async fn test_local_file_is_used_as_is() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(BODY.as_bytes()).unwrap();

        let config = FetchConfig::builder().local_ontology_path(file.path()).build();
        let handle = GoDownloader::new(config).unwrap().retrieve().await.unwrap();

        assert!(!handle.is_temporary());
        assert_eq!(handle.path(), file.path());
    }

    #[tokio::test]
    async fn test_missing_local_file() {
        let config = FetchConfig::builder()
            .local_ontology_path("/nonexistent/go-basic.obo")
            .build();
        let err = GoDownloader::new(config).unwrap().retrieve().await.unwrap_err();
        assert!(matches!(err, GoError::Io(_)));
    }

    #[tokio::test]
    async fn test_download_to_temporary_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ontology/go-basic.obo"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .expect(1)
            .mount(&server)
            .await;

        let handle = GoDownloader::new(config_for(&server))
            .unwrap()
            .retrieve()
            .await
            .unwrap();

        assert!(handle.is_temporary());
        assert_eq!(std::fs::read_to_string(handle.path()).unwrap(), BODY);

        let temp_path = handle.path().to_path_buf();
        drop(handle);
        assert!(!temp_path.exists());
    }

    #[tokio::test]
    async fn test_http_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = GoDownloader::new(config_for(&server))
            .unwrap()
            .retrieve()
            .await
            .unwrap_err();

        match err {
            GoError::Http { status, url } => {
                assert_eq!(status.as_u16(), 404);
                assert!(url.ends_with("/ontology/go-basic.obo"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.max_retries = 2;
        let handle = GoDownloader::new(config).unwrap().retrieve().await.unwrap();

        assert_eq!(std::fs::read_to_string(handle.path()).unwrap(), BODY);
    }
}
