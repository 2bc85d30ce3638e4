use super::dto::{JikanAnimeData, JikanPagination};
use crate::modules::catalog::domain::{CatalogEntry, Pagination, PaginationItems};

pub struct JikanMapper;

impl JikanMapper {
    pub fn to_catalog_entry(anime: JikanAnimeData) -> CatalogEntry {
        let title = anime
            .title_english
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(anime.title);

        // webp first, jpg when the webp set is missing
        let cover_image = anime
            .images
            .webp
            .large_image_url
            .or(anime.images.jpg.large_image_url);

        CatalogEntry {
            id: anime.mal_id,
            title,
            cover_image,
            score: anime.score,
            year: anime.year,
            kind: anime.anime_type,
            airing: Some(anime.airing),
        }
    }

    pub fn to_pagination(pagination: Option<JikanPagination>, requested_page: u32) -> Pagination {
        match pagination {
            Some(p) => Pagination {
                current_page: p.current_page.unwrap_or(requested_page),
                last_visible_page: p.last_visible_page,
                has_next_page: p.has_next_page,
                items: PaginationItems {
                    total: p.items.and_then(|items| items.total),
                },
            },
            None => Pagination {
                current_page: requested_page,
                last_visible_page: requested_page,
                has_next_page: false,
                items: PaginationItems::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infrastructure::external::jikan::dto::{
        JikanImageSet, JikanImages, JikanPaginationItems,
    };

    fn anime(title_english: Option<&str>) -> JikanAnimeData {
        JikanAnimeData {
            mal_id: 52991,
            title: "Sousou no Frieren".to_string(),
            title_english: title_english.map(str::to_string),
            anime_type: Some("TV".to_string()),
            airing: true,
            score: Some(9.3),
            images: JikanImages {
                webp: JikanImageSet {
                    image_url: None,
                    large_image_url: Some("https://cdn/frieren.webp".to_string()),
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn english_title_wins_over_default_title() {
        let entry = JikanMapper::to_catalog_entry(anime(Some("Frieren: Beyond Journey's End")));
        assert_eq!(entry.title, "Frieren: Beyond Journey's End");
        assert_eq!(entry.kind.as_deref(), Some("TV"));
        assert_eq!(entry.airing, Some(true));
        assert_eq!(entry.cover_image.as_deref(), Some("https://cdn/frieren.webp"));
    }

    #[test]
    fn default_title_is_the_fallback() {
        let entry = JikanMapper::to_catalog_entry(anime(None));
        assert_eq!(entry.title, "Sousou no Frieren");
    }

    #[test]
    fn pagination_total_comes_from_items() {
        let pagination = JikanMapper::to_pagination(
            Some(JikanPagination {
                last_visible_page: 4,
                has_next_page: true,
                current_page: Some(2),
                items: Some(JikanPaginationItems {
                    count: Some(20),
                    total: Some(71),
                    per_page: Some(20),
                }),
            }),
            2,
        );
        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.total(), Some(71));
        assert!(pagination.has_next_page);
    }
}
