//! Canonical studio labels.
//!
//! TMDB credits the specific production company; the movie database tracks
//! the parent studio. Unmapped names pass through unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static STUDIO_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Walt Disney Pictures", "Disney"),
        ("Walt Disney Animation Studios", "Disney"),
        ("Pixar Animation Studios", "Disney"),
        ("Marvel Studios", "Disney"),
        ("Lucasfilm Ltd.", "Disney"),
        ("20th Century Fox", "Fox"),
        ("20th Century Studios", "Fox"),
        ("DreamWorks Animation", "DreamWorks"),
        ("DreamWorks Pictures", "DreamWorks"),
        ("Columbia Pictures", "Sony"),
        ("Sony Pictures Animation", "Sony"),
        ("Sony Pictures Entertainment", "Sony"),
        ("Warner Bros. Pictures", "Warner Bros."),
        ("New Line Cinema", "Warner Bros."),
        ("Metro-Goldwyn-Mayer (MGM)", "MGM"),
        ("Universal Pictures", "Universal"),
    ])
});

/// Map a production company name to its canonical studio label.
pub fn canonical_studio(name: &str) -> &str {
    STUDIO_MAP.get(name).copied().unwrap_or(name)
}
