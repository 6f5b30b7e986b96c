pub mod model_service;
pub mod retrieval_service;

pub use model_service::{ModelServiceClient, ModelServiceConfig};
pub use retrieval_service::{RetrievalServiceClient, RetrievalServiceConfig};

use reqwest::Url;

/// Parse a service base URL so that joined endpoints keep its path prefix.
///
/// `Url::join` replaces the last path segment unless the path ends in `/`.
fn service_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
