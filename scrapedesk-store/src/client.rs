use crate::company::{Company, CompanyId};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info};
use url::Url;

/// The backend collaborator: CRUD plus the scrape trigger.
///
/// Implementations are cheap to clone so a UI can hand a copy to every
/// spawned request.
pub trait RecordStore: Clone + Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<Company>>> + Send;

    fn get(&self, id: &CompanyId) -> impl Future<Output = Result<Company>> + Send;

    /// Ask the backend to scrape `url` and persist a new record. The response
    /// body is not used.
    fn scrape(&self, url: &str) -> impl Future<Output = Result<()>> + Send;

    fn delete(&self, id: &CompanyId) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

/// `RecordStore` over the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    config: StoreConfig,
}

impl HttpStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("scrapedesk/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Map non-success statuses to `StoreError::Status`.
    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(StoreError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }

    async fn send_get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }
}

impl RecordStore for HttpStore {
    async fn list(&self) -> Result<Vec<Company>> {
        let response = self.send_get(self.config.companies_url()).await?;
        let companies: Vec<Company> = Self::check_status(response)?.json().await?;
        info!("Fetched {} companies", companies.len());
        Ok(companies)
    }

    async fn get(&self, id: &CompanyId) -> Result<Company> {
        let response = self.send_get(self.config.company_url(id.as_str())).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(Self::check_status(response)?.json().await?)
    }

    async fn scrape(&self, url: &str) -> Result<()> {
        let target = self.config.scrape_url();
        debug!("POST {} (url={})", target, url);
        let response = self
            .client
            .post(target)
            .json(&ScrapeRequest { url })
            .send()
            .await?;
        Self::check_status(response)?;
        info!("Scrape requested for {}", url);
        Ok(())
    }

    async fn delete(&self, id: &CompanyId) -> Result<()> {
        let target = self.config.company_url(id.as_str());
        debug!("DELETE {}", target);
        let response = self.client.delete(target).send().await?;
        Self::check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    fn store_for(server: &MockServer) -> HttpStore {
        HttpStore::new(StoreConfig::new(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_list_companies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Acme", "email": "hello@acme.test"},
                {"id": 2, "name": "Globex"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let companies = store_for(&mock_server).list().await.unwrap();

        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].id.as_str(), "1");
        assert_eq!(companies[0].email.as_deref(), Some("hello@acme.test"));
        assert_eq!(companies[1].display_name(), "Globex");
    }

    #[tokio::test]
    async fn test_list_server_error_is_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/companies"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = store_for(&mock_server).list().await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_get_missing_company_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/companies/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let err = store_for(&mock_server)
            .get(&CompanyId::from("99"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "99"));
    }

    #[tokio::test]
    async fn test_scrape_posts_url_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/companies/scrape"))
            .and(body_json(serde_json::json!({"url": "https://acme.test"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("ignored"))
            .expect(1)
            .mount(&mock_server)
            .await;

        store_for(&mock_server)
            .scrape("https://acme.test")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_company() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/companies/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        store_for(&mock_server)
            .delete(&CompanyId::from("5"))
            .await
            .unwrap();
    }
}
