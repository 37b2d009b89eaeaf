//! Fill-only field reconciliation.
//!
//! Each field has a rule: where the value comes from, and how to build the
//! write payload. The emptiness gate is uniform — a rule only fires when the
//! page declares the field and its current value is empty per its own type's
//! rule — so a populated field is never overwritten, no matter what the
//! provider says.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::notion::{Page, Property, PropertyWrite};
use crate::tmdb::{MovieCredits, MovieDetails, DEFAULT_IMAGE_BASE_URL};

use super::studio::canonical_studio;

/// How many leading cast members map into StarN fields.
const STAR_FIELDS: usize = 4;

/// Which property type the movie database declares for the Studio field.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudioFieldKind {
    /// Follow whatever type the live page reports.
    #[default]
    Auto,
    Select,
    RichText,
}

/// Reconciler configuration.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Declared type of the Studio field.
    pub studio_field: StudioFieldKind,
    /// Base URL prefixed to poster paths when building the Art attachment.
    pub image_base_url: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            studio_field: StudioFieldKind::Auto,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

/// Provider data available for one record. Either part may be missing;
/// rules depending on it simply do not fire.
struct Sources<'a> {
    details: Option<&'a MovieDetails>,
    credits: Option<&'a MovieCredits>,
}

/// A single field rule: the target field name and the value builder.
/// Builders return `None` when the provider has nothing usable.
struct FieldRule {
    field: &'static str,
    build: Box<dyn Fn(&Page, &Sources) -> Option<PropertyWrite> + Send + Sync>,
}

/// Computes fill-only update sets.
pub struct Reconciler {
    rules: Vec<FieldRule>,
}

impl Reconciler {
    pub fn new(config: ReconcilerConfig) -> Self {
        let mut rules: Vec<FieldRule> = Vec::new();

        rules.push(FieldRule {
            field: "Overview",
            build: Box::new(|_, s| {
                let overview = s.details?.overview.as_deref()?;
                if overview.is_empty() {
                    return None;
                }
                Some(PropertyWrite::rich_text(overview))
            }),
        });

        rules.push(FieldRule {
            field: "Runtime",
            build: Box::new(|_, s| {
                let runtime = s.details?.runtime_minutes?;
                if runtime == 0 {
                    return None;
                }
                Some(PropertyWrite::number(runtime as f64))
            }),
        });

        rules.push(FieldRule {
            field: "Rating",
            build: Box::new(|_, s| {
                let rating = s.details?.vote_average?;
                if rating <= 0.0 {
                    return None;
                }
                Some(PropertyWrite::number(rating))
            }),
        });

        let image_base_url = config.image_base_url.clone();
        rules.push(FieldRule {
            field: "Art",
            build: Box::new(move |_, s| {
                let poster_path = s.details?.poster_path.as_deref()?;
                Some(PropertyWrite::external_file(
                    "poster",
                    format!("{}{}", image_base_url, poster_path),
                ))
            }),
        });

        rules.push(FieldRule {
            field: "Gross",
            build: Box::new(|_, s| {
                // Revenue of exactly zero means the provider has no figure.
                let revenue = s.details?.revenue.filter(|r| *r > 0)?;
                Some(PropertyWrite::rich_text(format_currency(revenue)))
            }),
        });

        rules.push(FieldRule {
            field: "Genre",
            build: Box::new(|_, s| {
                let genres = &s.details?.genres;
                if genres.is_empty() {
                    return None;
                }
                Some(PropertyWrite::multi_select(genres.iter().cloned()))
            }),
        });

        let studio_field = config.studio_field;
        rules.push(FieldRule {
            field: "Studio",
            build: Box::new(move |page, s| {
                let company = s.details?.production_companies.first()?;
                let studio = canonical_studio(company);

                let as_select = match studio_field {
                    StudioFieldKind::Select => true,
                    StudioFieldKind::RichText => false,
                    StudioFieldKind::Auto => {
                        matches!(page.property("Studio"), Some(Property::Select { .. }))
                    }
                };

                if as_select {
                    Some(PropertyWrite::select(studio))
                } else {
                    Some(PropertyWrite::rich_text(studio))
                }
            }),
        });

        rules.push(FieldRule {
            field: "Director",
            build: Box::new(|_, s| {
                let director = s.credits?.first_with_job("Director")?;
                Some(PropertyWrite::rich_text(director))
            }),
        });

        for index in 0..STAR_FIELDS {
            rules.push(FieldRule {
                field: star_field_name(index),
                build: Box::new(move |_, s| {
                    let member = s.credits?.cast.get(index)?;
                    Some(PropertyWrite::rich_text(member.name.clone()))
                }),
            });
        }

        Self { rules }
    }

    /// Compute the update set for one page.
    ///
    /// A rule fires only when the page declares the field and its current
    /// value is empty per the property type's own rule. The result may be
    /// empty, in which case the caller skips the update call entirely.
    pub fn reconcile(
        &self,
        page: &Page,
        details: Option<&MovieDetails>,
        credits: Option<&MovieCredits>,
    ) -> HashMap<String, PropertyWrite> {
        let sources = Sources { details, credits };
        let mut updates = HashMap::new();

        for rule in &self.rules {
            let Some(current) = page.property(rule.field) else {
                continue;
            };
            if !current.is_empty() {
                continue;
            }
            if let Some(write) = (rule.build)(page, &sources) {
                updates.insert(rule.field.to_string(), write);
            }
        }

        updates
    }
}

fn star_field_name(index: usize) -> &'static str {
    match index {
        0 => "Star1",
        1 => "Star2",
        2 => "Star3",
        _ => "Star4",
    }
}

/// Format a revenue figure as a dollar amount with thousands separators
/// and no decimal places, e.g. `1234567` -> `"$1,234,567"`.
pub fn format_currency(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}
