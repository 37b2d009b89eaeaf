//! Testing utilities and mock implementations.
//!
//! Mocks for the two external collaborators let the batch drivers run
//! end-to-end without real infrastructure.

mod mock_metadata_provider;
mod mock_page_database;

pub use mock_metadata_provider::MockMetadataProvider;
pub use mock_page_database::MockPageDatabase;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::notion::{
        FileRef, Page, Property, PropertyWrite, RelationRef, RichTextItem, SelectOption,
    };
    use crate::tmdb::{CastMember, CrewMember, MovieCredits, MovieDetails};

    fn rich_text_value(text: &str) -> Vec<RichTextItem> {
        vec![RichTextItem {
            plain_text: text.to_string(),
        }]
    }

    /// A movie page with the full enrichment schema, all enrichable fields
    /// empty. The Year field is rich text, matching the real database.
    pub fn movie_page(id: &str, title: &str, year: Option<&str>) -> Page {
        let mut page = Page {
            id: id.to_string(),
            properties: Default::default(),
        };

        page.properties.insert(
            "Title".to_string(),
            Property::Title {
                title: rich_text_value(title),
            },
        );
        page.properties.insert(
            "Year".to_string(),
            Property::RichText {
                rich_text: year.map(rich_text_value).unwrap_or_default(),
            },
        );
        for field in [
            "Overview", "Gross", "Director", "Star1", "Star2", "Star3", "Star4", "Studio",
        ] {
            page.properties
                .insert(field.to_string(), Property::RichText { rich_text: vec![] });
        }
        page.properties
            .insert("Runtime".to_string(), Property::Number { number: None });
        page.properties
            .insert("Rating".to_string(), Property::Number { number: None });
        page.properties
            .insert("Art".to_string(), Property::Files { files: vec![] });
        page.properties.insert(
            "Genre".to_string(),
            Property::MultiSelect {
                multi_select: vec![],
            },
        );
        page.properties
            .insert("Genres".to_string(), Property::Relation { relation: vec![] });

        page
    }

    /// Set the tag-style genre names on a movie page.
    pub fn with_genre_tags(mut page: Page, tags: &[&str]) -> Page {
        page.properties.insert(
            "Genre".to_string(),
            Property::MultiSelect {
                multi_select: tags
                    .iter()
                    .map(|t| SelectOption {
                        name: t.to_string(),
                    })
                    .collect(),
            },
        );
        page
    }

    /// A genre page with the given canonical name.
    pub fn genre_page(id: &str, name: &str) -> Page {
        let mut page = Page {
            id: id.to_string(),
            properties: Default::default(),
        };
        page.properties.insert(
            "Name".to_string(),
            Property::Title {
                title: rich_text_value(name),
            },
        );
        page
    }

    /// Movie details with reasonable defaults.
    pub fn movie_details(id: u64, title: &str, year: u32) -> MovieDetails {
        MovieDetails {
            id,
            title: title.to_string(),
            release_date: Some(format!("{}-06-15", year)),
            runtime_minutes: Some(120),
            vote_average: Some(7.5),
            revenue: Some(187_436_818),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
            poster_path: Some("/poster.jpg".to_string()),
            genres: vec!["Action".to_string(), "Crime".to_string()],
            production_companies: vec!["Warner Bros. Pictures".to_string()],
        }
    }

    /// Credits with one director and the given cast, in billing order.
    pub fn movie_credits(director: &str, cast: &[&str]) -> MovieCredits {
        MovieCredits {
            crew: vec![CrewMember {
                name: director.to_string(),
                job: "Director".to_string(),
            }],
            cast: cast
                .iter()
                .map(|name| CastMember {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    /// Convert an update payload into the property a subsequent read would
    /// report, as the real API does after applying an update.
    pub fn applied_property(write: &PropertyWrite) -> Property {
        match write {
            PropertyWrite::RichText { rich_text } => Property::RichText {
                rich_text: rich_text
                    .iter()
                    .map(|w| RichTextItem {
                        plain_text: w.text.content.clone(),
                    })
                    .collect(),
            },
            PropertyWrite::Number { number } => Property::Number {
                number: Some(*number),
            },
            PropertyWrite::MultiSelect { multi_select } => Property::MultiSelect {
                multi_select: multi_select.clone(),
            },
            PropertyWrite::Files { files } => Property::Files {
                files: files
                    .iter()
                    .map(|f| FileRef {
                        name: f.name.clone(),
                    })
                    .collect(),
            },
            PropertyWrite::Relation { relation } => Property::Relation {
                relation: relation
                    .iter()
                    .map(|r| RelationRef { id: r.id.clone() })
                    .collect(),
            },
            PropertyWrite::Select { select } => Property::Select {
                select: Some(select.clone()),
            },
        }
    }
}
