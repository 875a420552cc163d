use crate::adapters::http::get_json;
use crate::domain::model::{Page, SalaryBound};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const SOURCE_NAME: &str = "SuperJob";
pub const TOKEN_HEADER: &str = "X-Api-App-Id";
pub const TOKEN_ENV: &str = "SUPERJOB_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperJobSettings {
    pub endpoint: String,
    /// Application secret key, sent in the `X-Api-App-Id` header.
    pub token: Option<String>,
    pub town: String,
    /// Catalogue id, 48 is "Development, programming".
    pub catalogues: String,
    pub currency: String,
    pub period_days: u32,
    pub per_page: u32,
    pub keyword_prefix: String,
}

impl Default for SuperJobSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.superjob.ru/2.33/vacancies/".to_string(),
            token: None,
            town: "Москва".to_string(),
            catalogues: "48".to_string(),
            currency: "rub".to_string(),
            period_days: 7,
            per_page: 100,
            keyword_prefix: "Программист".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vacancy {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub payment_from: Option<f64>,
    #[serde(default)]
    pub payment_to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VacancyPage {
    objects: Vec<Vacancy>,
    more: bool,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct VacancyCount {
    total: u64,
}

pub struct SuperJobAdapter {
    settings: SuperJobSettings,
    client: Client,
}

impl SuperJobAdapter {
    pub fn new(settings: SuperJobSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn search_params(&self, category: &str) -> Vec<(&'static str, String)> {
        vec![
            ("keyword", format!("{} {}", self.settings.keyword_prefix, category)),
            ("town", self.settings.town.clone()),
            ("catalogues", self.settings.catalogues.clone()),
            ("currency", self.settings.currency.clone()),
            ("period", self.settings.period_days.to_string()),
            ("no_agreement", "1".to_string()),
        ]
    }

    fn request(&self, params: &[(&'static str, String)]) -> reqwest::RequestBuilder {
        let request = self.client.get(&self.settings.endpoint).query(params);
        match &self.settings.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }
}

#[async_trait]
impl SourceAdapter for SuperJobAdapter {
    type Posting = Vacancy;

    fn name(&self) -> &str {
        SOURCE_NAME
    }

    /// SuperJob reports an unspecified bound as `0`.
    fn bounds_of(&self, vacancy: &Vacancy) -> SalaryBound {
        let specified = |value: Option<f64>| value.filter(|v| *v != 0.0);
        SalaryBound::new(specified(vacancy.payment_from), specified(vacancy.payment_to))
    }

    async fn fetch_page(&self, category: &str, page: u32) -> Result<Page<Vacancy>> {
        let mut params = self.search_params(category);
        params.push(("count", self.settings.per_page.to_string()));
        params.push(("page", page.to_string()));

        let body: VacancyPage = get_json(self.request(&params), SOURCE_NAME).await?;
        Ok(Page {
            items: body.objects,
            is_last: !body.more,
            total_found: body.total,
        })
    }

    async fn count_matching(&self, category: &str) -> Result<u64> {
        let request = self.request(&self.search_params(category));
        let body: VacancyCount = get_json(request, SOURCE_NAME).await?;
        Ok(body.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SalaryError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn adapter(endpoint: String) -> SuperJobAdapter {
        let settings = SuperJobSettings {
            endpoint,
            token: Some("v3.r.test-key".to_string()),
            ..SuperJobSettings::default()
        };
        SuperJobAdapter::new(settings, Client::new())
    }

    fn vacancy(from: f64, to: f64) -> Vacancy {
        serde_json::from_value(json!({"id": 1, "payment_from": from, "payment_to": to, "currency": "rub"}))
            .unwrap()
    }

    #[test]
    fn test_zero_bounds_are_absent() {
        let sj = adapter("http://localhost".to_string());
        assert_eq!(sj.bounds_of(&vacancy(0.0, 0.0)), SalaryBound::absent());
        assert_eq!(sj.bounds_of(&vacancy(90_000.0, 0.0)), SalaryBound::new(Some(90_000.0), None));
        assert_eq!(sj.bounds_of(&vacancy(0.0, 120_000.0)), SalaryBound::new(None, Some(120_000.0)));
        assert_eq!(
            sj.bounds_of(&vacancy(90_000.0, 120_000.0)),
            SalaryBound::new(Some(90_000.0), Some(120_000.0))
        );
    }

    #[test]
    fn test_missing_payment_fields_are_absent() {
        let sj = adapter("http://localhost".to_string());
        let vacancy: Vacancy = serde_json::from_value(json!({"id": 5, "payment_from": null})).unwrap();
        assert_eq!(sj.bounds_of(&vacancy), SalaryBound::absent());
    }

    #[tokio::test]
    async fn test_fetch_page_sends_token_and_filters() {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/2.33/vacancies/")
                    .header("X-Api-App-Id", "v3.r.test-key")
                    .query_param("keyword", "Программист Python")
                    .query_param("currency", "rub")
                    .query_param("no_agreement", "1")
                    .query_param("count", "100")
                    .query_param("page", "0");
                then.status(200).json_body(json!({
                    "objects": [
                        {"id": 1, "payment_from": 100000, "payment_to": 0, "currency": "rub"}
                    ],
                    "more": false,
                    "total": 1
                }));
            })
            .await;

        let sj = adapter(server.url("/2.33/vacancies/"));
        let page = sj.fetch_page("Python", 0).await.unwrap();

        page_mock.assert_async().await;
        assert_eq!(page.items.len(), 1);
        assert!(page.is_last);
        assert_eq!(page.total_found, 1);
    }

    #[tokio::test]
    async fn test_more_flag_keeps_paging() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/2.33/vacancies/").query_param("page", "0");
                then.status(200)
                    .json_body(json!({"objects": [{"id": 1}], "more": true, "total": 250}));
            })
            .await;

        let sj = adapter(server.url("/2.33/vacancies/"));
        let page = sj.fetch_page("Java", 0).await.unwrap();
        assert!(!page.is_last);
        assert_eq!(page.total_found, 250);
    }

    #[tokio::test]
    async fn test_count_matching_reads_total() {
        let server = MockServer::start_async().await;
        let count_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/2.33/vacancies/")
                    .query_param("keyword", "Программист Go");
                then.status(200).json_body(json!({"objects": [], "more": false, "total": 58}));
            })
            .await;

        let sj = adapter(server.url("/2.33/vacancies/"));
        assert_eq!(sj.count_matching("Go").await.unwrap(), 58);
        count_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forbidden_without_valid_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/2.33/vacancies/");
                then.status(403).json_body(json!({"error": {"code": 403, "message": "Invalid app_key"}}));
            })
            .await;

        let sj = adapter(server.url("/2.33/vacancies/"));
        let err = sj.fetch_page("Go", 0).await.unwrap_err();
        assert!(err.is_source_failure());
        assert!(matches!(err, SalaryError::HttpStatus { .. }));
    }
}
