use serde_json::{json, Value};

pub struct AniListQueries;

impl AniListQueries {
    pub fn releasing_by_popularity() -> &'static str {
        r#"
        query ($perPage: Int) {
            Page(page: 1, perPage: $perPage) {
                media(type: ANIME, status: RELEASING, sort: POPULARITY_DESC) {
                    id
                    title { romaji english }
                    bannerImage
                    coverImage { color extraLarge }
                    description
                    genres
                    averageScore
                    startDate { year }
                }
            }
        }
        "#
    }

    pub fn movies_by_popularity() -> &'static str {
        r#"
        query ($perPage: Int) {
            Page(page: 1, perPage: $perPage) {
                media(type: ANIME, format: MOVIE, sort: POPULARITY_DESC) {
                    id
                    title { romaji english }
                    bannerImage
                    coverImage { color extraLarge }
                    description
                    genres
                    averageScore
                    startDate { year }
                }
            }
        }
        "#
    }

    pub fn page_variables(per_page: u32) -> Value {
        json!({ "perPage": per_page })
    }
}
