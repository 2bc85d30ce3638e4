use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GraphQL envelope. Either `data` or `errors` (or both) may be present.
#[derive(Debug, Clone, Deserialize)]
pub struct AniListResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<AniListError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AniListError {
    pub message: String,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AniListRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "Page")]
    pub page: AniListPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AniListPage {
    #[serde(default)]
    pub media: Vec<AniListMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListMedia {
    pub id: i64,
    #[serde(default)]
    pub title: AniListTitle,
    pub banner_image: Option<String>,
    #[serde(default)]
    pub cover_image: AniListCoverImage,
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub average_score: Option<i32>,
    #[serde(default)]
    pub start_date: AniListDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AniListTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListCoverImage {
    pub color: Option<String>,
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AniListDate {
    pub year: Option<i32>,
}
