use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnimeListResponse {
    #[serde(default)]
    pub data: Vec<JikanAnimeData>,
    pub pagination: Option<JikanPagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanPagination {
    #[serde(default)]
    pub last_visible_page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    pub current_page: Option<u32>,
    pub items: Option<JikanPaginationItems>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanPaginationItems {
    pub count: Option<u32>,
    pub total: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanAnimeData {
    pub mal_id: i64,
    #[serde(default)]
    pub images: JikanImages,
    #[serde(default)]
    pub title: String,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub airing: bool,
    pub score: Option<f64>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImages {
    #[serde(default)]
    pub webp: JikanImageSet,
    #[serde(default)]
    pub jpg: JikanImageSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}
