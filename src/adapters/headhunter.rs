use crate::adapters::http::get_json;
use crate::domain::model::{Page, SalaryBound};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const SOURCE_NAME: &str = "HeadHunter";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadHunterSettings {
    pub endpoint: String,
    /// Region id, 1 is Moscow.
    pub area: u32,
    pub period_days: u32,
    pub per_page: u32,
    pub keyword_prefix: String,
    pub user_agent: String,
    /// Only salaries quoted in this currency are used.
    pub currency: String,
}

impl Default for HeadHunterSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.hh.ru/vacancies".to_string(),
            area: 1,
            period_days: 30,
            per_page: 100,
            keyword_prefix: "программист".to_string(),
            user_agent: concat!("salary-stats/", env!("CARGO_PKG_VERSION")).to_string(),
            currency: "RUR".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vacancy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<Salary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Salary {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VacancyPage {
    items: Vec<Vacancy>,
    pages: u32,
    found: u64,
}

#[derive(Debug, Deserialize)]
struct VacancyCount {
    found: u64,
}

pub struct HeadHunterAdapter {
    settings: HeadHunterSettings,
    client: Client,
}

impl HeadHunterAdapter {
    pub fn new(settings: HeadHunterSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn search_params(&self, category: &str) -> Vec<(&'static str, String)> {
        vec![
            ("text", format!("{} {}", self.settings.keyword_prefix, category)),
            ("area", self.settings.area.to_string()),
            ("period", self.settings.period_days.to_string()),
            ("only_with_salary", "true".to_string()),
        ]
    }

    fn request(&self, params: &[(&'static str, String)]) -> reqwest::RequestBuilder {
        self.client
            .get(&self.settings.endpoint)
            .header(USER_AGENT, &self.settings.user_agent)
            .query(params)
    }
}

#[async_trait]
impl SourceAdapter for HeadHunterAdapter {
    type Posting = Vacancy;

    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn bounds_of(&self, vacancy: &Vacancy) -> SalaryBound {
        match &vacancy.salary {
            Some(salary) if salary.currency.as_deref() == Some(self.settings.currency.as_str()) => {
                SalaryBound::new(salary.from, salary.to)
            }
            _ => SalaryBound::absent(),
        }
    }

    async fn fetch_page(&self, category: &str, page: u32) -> Result<Page<Vacancy>> {
        let mut params = self.search_params(category);
        params.push(("per_page", self.settings.per_page.to_string()));
        params.push(("page", page.to_string()));

        let body: VacancyPage = get_json(self.request(&params), SOURCE_NAME).await?;
        Ok(Page {
            items: body.items,
            is_last: page + 1 >= body.pages,
            total_found: body.found,
        })
    }

    async fn count_matching(&self, category: &str) -> Result<u64> {
        let request = self.request(&self.search_params(category));
        let body: VacancyCount = get_json(request, SOURCE_NAME).await?;
        Ok(body.found)
    }
}
