//! REST implementation of the link and analytics gateways.

use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::dto::{
    AllLinksResponseDto, CreateLinkRequestDto, DailyClicksDto, LinkRecordDto, PageResponseDto,
};
use crate::domain::entities::{DailyClicks, LinkRecord, NewLinkRecord};
use crate::domain::gateways::{AnalyticsGateway, LinkGateway};
use crate::domain::query::{ListQuery, PageResult};
use crate::error::AppError;

const LOAD_LINKS_FAILED: &str = "Failed to load links";
const CREATE_FAILED: &str = "Failed to create URL";
const DELETE_FAILED: &str = "Failed to delete link.";
const ANALYTICS_FAILED: &str = "Failed to load analytics data";

/// Link gateway backed by `/api/urls` and `/api/analytics`.
#[derive(Debug, Clone)]
pub struct HttpLinkGateway {
    client: ApiClient,
}

impl HttpLinkGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkGateway for HttpLinkGateway {
    async fn list_page(&self, query: ListQuery) -> Result<PageResult, AppError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.page_size.to_string()),
        ];
        if let Some(term) = query.search_term() {
            params.push(("search", term.to_string()));
        }

        let request = self
            .client
            .request(Method::GET, &["api", "urls"])
            .query(&params);
        let page: PageResponseDto = self.client.send_json(request, LOAD_LINKS_FAILED).await?;
        Ok(page.into())
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, AppError> {
        let request = self
            .client
            .request(Method::GET, &["api", "urls"])
            .query(&[("all", "true")]);
        let all: AllLinksResponseDto = self.client.send_json(request, LOAD_LINKS_FAILED).await?;
        Ok(all.into())
    }

    async fn create(&self, new_link: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let request = self
            .client
            .request(Method::POST, &["api", "urls"])
            .json(&CreateLinkRequestDto::from(new_link));
        let created: LinkRecordDto = self.client.send_json(request, CREATE_FAILED).await?;
        Ok(created.into())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let request = self.client.request(Method::DELETE, &["api", "urls", id]);
        self.client.send_empty(request, DELETE_FAILED).await
    }
}

#[async_trait]
impl AnalyticsGateway for HttpLinkGateway {
    async fn daily_clicks(&self, url_id: &str) -> Result<Vec<DailyClicks>, AppError> {
        let request = self
            .client
            .request(Method::GET, &["api", "analytics", url_id]);
        let series: Vec<DailyClicksDto> = self.client.send_json(request, ANALYTICS_FAILED).await?;
        Ok(series.into_iter().map(DailyClicks::from).collect())
    }
}
