/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use anishelf_lib::modules::catalog::{CatalogEntry, MovieEntry};
use anishelf_lib::modules::identity::UserIdentity;
use anishelf_lib::modules::lists::AnimePayload;
use serde_json::{json, Value};
use uuid::Uuid;

pub struct AnimeFactory {
    id: Value,
    title: String,
    cover_image: Option<String>,
    score: Option<f64>,
}

impl AnimeFactory {
    pub fn new(id: i64) -> Self {
        Self {
            id: json!(id),
            title: format!("Test Anime {}", id),
            cover_image: None,
            score: None,
        }
    }

    /// Upstream ids sometimes arrive as strings
    pub fn with_string_id(id: &str) -> Self {
        Self {
            id: json!(id),
            ..Self::new(0)
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn cover_image(mut self, url: &str) -> Self {
        self.cover_image = Some(url.to_string());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "coverImage": self.cover_image,
            "score": self.score,
        })
    }

    pub fn build(self) -> AnimePayload {
        AnimePayload::new(self.json()).expect("factory payload has an id")
    }
}

pub fn anime(id: i64) -> AnimePayload {
    AnimeFactory::new(id).build()
}

pub struct UserFactory;

impl UserFactory {
    pub fn user() -> UserIdentity {
        UserIdentity::new(Uuid::new_v4())
    }

    pub fn with_email(email: &str) -> UserIdentity {
        UserIdentity::new(Uuid::new_v4()).with_email(email)
    }
}

pub fn catalog_entry(id: i64, title: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        title: title.to_string(),
        cover_image: Some(format!("https://cdn.example/{}.webp", id)),
        score: Some(8.5),
        year: None,
        kind: Some("TV".to_string()),
        airing: Some(true),
    }
}

pub fn movie_entry(id: i64, title: &str) -> MovieEntry {
    MovieEntry {
        id,
        title: title.to_string(),
        banner_image: None,
        cover_image: None,
        description: "No description available.".to_string(),
        genres: vec!["Drama".to_string()],
        year: Some(2016),
        score: Some(85.0),
        color: Some("#f1a143".to_string()),
    }
}
