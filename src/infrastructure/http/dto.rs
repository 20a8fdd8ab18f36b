//! Wire formats of the link backend.
//!
//! The backend speaks camelCase JSON. DTOs are converted into domain entities
//! at the gateway boundary and never leak past it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as, skip_serializing_none};

use crate::domain::entities::{AccountUser, AuthSession, DailyClicks, LinkRecord, NewLinkRecord};
use crate::domain::query::PageResult;

/// A link as returned by `/api/urls`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecordDto {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub total_clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRecordDto> for LinkRecord {
    fn from(dto: LinkRecordDto) -> Self {
        LinkRecord::new(
            dto.id,
            dto.short_code,
            dto.original_url,
            dto.total_clicks,
            dto.created_at,
        )
    }
}

/// Paginated response of `GET /api/urls?page=&search=`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponseDto {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub items: Vec<LinkRecordDto>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub total_pages: u32,
}

impl From<PageResponseDto> for PageResult {
    fn from(dto: PageResponseDto) -> Self {
        PageResult::new(
            dto.items.into_iter().map(LinkRecord::from).collect(),
            dto.total_pages,
        )
    }
}

/// Response of the unpaginated listing.
///
/// Backends answer either with a bare array or with the paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AllLinksResponseDto {
    List(Vec<LinkRecordDto>),
    Envelope { items: Vec<LinkRecordDto> },
}

impl From<AllLinksResponseDto> for Vec<LinkRecord> {
    fn from(dto: AllLinksResponseDto) -> Self {
        let items = match dto {
            AllLinksResponseDto::List(items) => items,
            AllLinksResponseDto::Envelope { items } => items,
        };
        items.into_iter().map(LinkRecord::from).collect()
    }
}

/// Body of `POST /api/urls`.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequestDto {
    pub original_url: String,
    pub custom_alias: Option<String>,
}

impl From<NewLinkRecord> for CreateLinkRequestDto {
    fn from(new_link: NewLinkRecord) -> Self {
        Self {
            original_url: new_link.original_url,
            custom_alias: new_link.custom_alias,
        }
    }
}

/// One entry of `GET /api/analytics/:urlId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyClicksDto {
    pub id: String,
    pub url_id: String,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub total_clicks: u64,
}

impl From<DailyClicksDto> for DailyClicks {
    fn from(dto: DailyClicksDto) -> Self {
        DailyClicks::new(dto.id, dto.url_id, dto.date, dto.total_clicks)
    }
}

/// Accepts RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates (midnight UTC).
mod flexible_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
    }
}

/// Body of the login and register endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

/// Account part of an auth response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUserDto {
    pub id: String,
    pub email: String,
}

/// Response of the login and register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponseDto {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: AccountUserDto,
}

impl From<AuthResponseDto> for AuthSession {
    fn from(dto: AuthResponseDto) -> Self {
        AuthSession {
            token: dto.token,
            user: AccountUser {
                id: dto.user.id,
                email: dto.user.email,
            },
        }
    }
}

/// Error envelope. `message` is a string or, for field validation, a list of strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBodyDto {
    pub message: Option<ErrorMessageDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessageDto {
    One(String),
    Many(Vec<String>),
}

impl ErrorBodyDto {
    /// Flattens the message; `None` when the backend sent nothing usable.
    pub fn text(&self) -> Option<String> {
        let text = match self.message.as_ref()? {
            ErrorMessageDto::One(m) => m.trim().to_string(),
            ErrorMessageDto::Many(ms) => ms.join("; "),
        };
        (!text.is_empty()).then_some(text)
    }
}
