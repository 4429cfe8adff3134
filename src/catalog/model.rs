//! Typed readings of catalog payloads for the views.
//!
//! Every field is defaulted: the service owns the schema and a missing key
//! should degrade a row, not fail the whole page.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::request::MovieId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl MoviePage {
    /// True when the service reports at least one page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub poster_path: Option<String>,
}

impl MovieSummary {
    pub fn movie_id(&self) -> MovieId {
        MovieId::from(self.id)
    }

    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub iso_639_1: String,
    #[serde(default)]
    pub english_name: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub status: String,
    pub genres: Vec<Genre>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub budget: u64,
    pub revenue: u64,
    pub homepage: Option<String>,
    pub poster_path: Option<String>,
    pub production_countries: Vec<Country>,
    pub spoken_languages: Vec<SpokenLanguage>,
}

impl MovieDetails {
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// "2h 19m" style runtime, `None` when unknown or zero.
    pub fn runtime_label(&self) -> Option<String> {
        match self.runtime {
            Some(minutes) if minutes > 0 => Some(format!("{}h {:02}m", minutes / 60, minutes % 60)),
            _ => None,
        }
    }
}

fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::request::CatalogResponse;
    use serde_json::json;

    #[test]
    fn decodes_popular_page() {
        let body = json!({
            "page": 1,
            "results": [
                {"id": 550, "title": "El club de la lucha", "release_date": "1999-10-15",
                 "vote_average": 8.4, "poster_path": "/abc.jpg", "genre_ids": [18]},
                {"id": 13, "title": "Forrest Gump"}
            ],
            "total_pages": 500,
            "total_results": 10000
        });
        let page: MoviePage = CatalogResponse::new(body).decode().unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].release_year(), Some(1999));
        assert_eq!(page.results[0].movie_id().as_str(), "550");
        assert_eq!(page.results[1].release_year(), None);
        assert!(page.has_next());
    }

    #[test]
    fn blank_release_date_has_no_year() {
        let movie = MovieSummary {
            release_date: Some(String::new()),
            ..MovieSummary::default()
        };
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn decodes_details() {
        let body = json!({
            "id": 238,
            "title": "El padrino",
            "runtime": 175,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crimen"}],
            "release_date": "1972-03-14",
            "tagline": null
        });
        let details: MovieDetails = CatalogResponse::new(body).decode().unwrap();
        assert_eq!(details.genre_names(), "Drama, Crimen");
        assert_eq!(details.runtime_label().as_deref(), Some("2h 55m"));
        assert_eq!(details.release_year(), Some(1972));
        assert_eq!(details.tagline, None);
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = CatalogResponse::new(json!({"results": "nope"}))
            .decode::<MoviePage>()
            .unwrap_err();
        assert!(matches!(err, crate::catalog::CatalogError::Decode(_)));
    }
}
