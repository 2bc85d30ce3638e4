use serde::{Deserialize, Serialize};

/// One card in a discovery rail, normalized across upstreams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    pub cover_image: Option<String>,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airing: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntry {
    pub id: i64,
    pub title: String,
    pub banner_image: Option<String>,
    pub cover_image: Option<String>,
    pub description: String,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub score: Option<f64>,
    pub color: Option<String>,
}

/// Both rails of the landing page, fetched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringFeed {
    pub top_airing: Vec<CatalogEntry>,
    pub current_season: Vec<CatalogEntry>,
}

/// Search paging, in Jikan's wire shape (`items.total` carries the result count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_visible_page: u32,
    pub has_next_page: bool,
    pub items: PaginationItems,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationItems {
    pub total: Option<u32>,
}

impl Pagination {
    pub fn total(&self) -> Option<u32> {
        self.items.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<CatalogEntry>,
    pub pagination: Pagination,
}

impl SearchPage {
    pub fn empty(page: u32) -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination {
                current_page: page,
                last_visible_page: page,
                has_next_page: false,
                items: PaginationItems { total: Some(0) },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_page_nests_total_under_items() {
        let mut page = SearchPage::empty(1);
        page.pagination.last_visible_page = 4;
        page.pagination.has_next_page = true;
        page.pagination.items.total = Some(71);

        let value = serde_json::to_value(&page).unwrap();

        assert_eq!(
            value["pagination"],
            json!({
                "current_page": 1,
                "last_visible_page": 4,
                "has_next_page": true,
                "items": { "total": 71 }
            })
        );
        assert_eq!(value["data"], json!([]));
    }

    #[test]
    fn catalog_entry_omits_absent_optional_fields() {
        let entry = CatalogEntry {
            id: 5114,
            title: "Fullmetal Alchemist: Brotherhood".to_string(),
            cover_image: None,
            score: Some(9.1),
            year: None,
            kind: Some("TV".to_string()),
            airing: None,
        };

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["type"], "TV");
        assert_eq!(value["coverImage"], serde_json::Value::Null);
        assert!(value.get("year").is_none());
        assert!(value.get("airing").is_none());
    }
}
