use super::dto::{AniListMedia, AniListTitle};
use crate::modules::catalog::domain::{clean_description, CatalogEntry, MovieEntry};

pub struct AniListMapper;

impl AniListMapper {
    /// English title when present, else romaji
    pub fn preferred_title(title: &AniListTitle) -> String {
        title
            .english
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(title.romaji.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    pub fn to_catalog_entry(media: AniListMedia) -> CatalogEntry {
        CatalogEntry {
            id: media.id,
            title: Self::preferred_title(&media.title),
            cover_image: media.cover_image.extra_large,
            score: media.average_score.map(f64::from),
            year: media.start_date.year,
            kind: None,
            airing: None,
        }
    }

    pub fn to_movie_entry(media: AniListMedia) -> MovieEntry {
        MovieEntry {
            id: media.id,
            title: Self::preferred_title(&media.title),
            banner_image: media.banner_image,
            description: clean_description(media.description.as_deref()),
            cover_image: media.cover_image.extra_large,
            color: media.cover_image.color,
            genres: media.genres,
            year: media.start_date.year,
            score: media.average_score.map(f64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infrastructure::external::anilist::dto::{
        AniListCoverImage, AniListDate,
    };

    fn media(english: Option<&str>, romaji: Option<&str>) -> AniListMedia {
        AniListMedia {
            id: 21,
            title: AniListTitle {
                english: english.map(str::to_string),
                romaji: romaji.map(str::to_string),
            },
            cover_image: AniListCoverImage {
                color: Some("#e4a15d".to_string()),
                extra_large: Some("https://img/cover.jpg".to_string()),
            },
            average_score: Some(87),
            start_date: AniListDate { year: Some(1999) },
            ..Default::default()
        }
    }

    #[test]
    fn english_title_is_preferred() {
        let entry = AniListMapper::to_catalog_entry(media(Some("ONE PIECE"), Some("ONE PIECE")));
        assert_eq!(entry.title, "ONE PIECE");
        assert_eq!(entry.score, Some(87.0));
        assert_eq!(entry.year, Some(1999));
        assert_eq!(entry.cover_image.as_deref(), Some("https://img/cover.jpg"));
    }

    #[test]
    fn romaji_is_used_without_english() {
        let entry = AniListMapper::to_catalog_entry(media(None, Some("Sousou no Frieren")));
        assert_eq!(entry.title, "Sousou no Frieren");
    }

    #[test]
    fn movie_entry_carries_color_and_placeholder_description() {
        let movie = AniListMapper::to_movie_entry(media(Some("Your Name."), None));
        assert_eq!(movie.color.as_deref(), Some("#e4a15d"));
        assert_eq!(movie.description, "No description available.");
    }
}
