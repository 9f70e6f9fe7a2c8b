//! Details overlay rendering.

use crate::core::session::Overlay;
use crate::models::catalog::DetailRecord;
use colored::Colorize;

/// Render the overlay, `None` when it is closed.
pub fn render_overlay(overlay: &Overlay<'_>) -> Option<String> {
    match overlay {
        Overlay::Closed => None,
        Overlay::Loading { .. } => Some(render_loading()),
        Overlay::Open(record) => Some(render_details(record)),
    }
}

fn render_loading() -> String {
    format!("{}\n{}", rule(), "Loading movie details...".cyan())
}

fn rule() -> String {
    "═".repeat(60)
}

/// Render a full detail record. Absent fields are skipped.
pub fn render_details(record: &DetailRecord) -> String {
    let mut lines = vec![rule(), record.title.bold().to_string()];

    let kind = record.kind.map(|k| k.to_string());
    let facts: Vec<&str> = [
        record.year.as_deref(),
        record.rated.as_deref(),
        record.runtime.as_deref(),
        kind.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !facts.is_empty() {
        lines.push(facts.join(" • "));
    }

    lines.push(match record.poster_url.as_deref() {
        Some(url) => format!("Poster: {}", url.dimmed()),
        None => "Poster: 🎬".to_string(),
    });

    let genres = record.genres();
    if !genres.is_empty() {
        lines.push(field("Genre", &genres.join(", ")));
    }
    if let Some(ref plot) = record.plot {
        lines.push(field("Plot", plot));
    }

    let mut ratings = Vec::new();
    if let Some(ref imdb) = record.imdb_rating {
        ratings.push(format!("IMDb: {}/10", imdb));
    }
    if let Some(ref metascore) = record.metascore {
        ratings.push(format!("Metascore: {}/100", metascore));
    }
    ratings.extend(
        record
            .ratings
            .iter()
            .map(|r| format!("{}: {}", r.source, r.value)),
    );
    if !ratings.is_empty() {
        lines.push(field("Ratings", &ratings.join("  ")));
    }

    let rows = [
        ("Votes", &record.imdb_votes),
        ("Director", &record.director),
        ("Writer", &record.writer),
        ("Actors", &record.actors),
        ("Released", &record.released),
        ("Language", &record.language),
        ("Country", &record.country),
        ("Awards", &record.awards),
        ("Box office", &record.box_office),
        ("DVD", &record.dvd),
        ("Production", &record.production),
        ("Website", &record.website),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            lines.push(field(label, value));
        }
    }

    lines.push(format!("IMDb ID: {}", record.id));
    lines.push("(:close to dismiss)".dimmed().to_string());
    lines.join("\n")
}

fn field(label: &str, value: &str) -> String {
    format!("{} {}", format!("{}:", label).bold(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{MediaKind, Rating};

    fn shawshank() -> DetailRecord {
        DetailRecord {
            id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: Some("1994".to_string()),
            kind: Some(MediaKind::Movie),
            rated: Some("R".to_string()),
            runtime: Some("142 min".to_string()),
            genre: Some("Drama".to_string()),
            director: Some("Frank Darabont".to_string()),
            plot: Some("Two imprisoned men bond over a number of years.".to_string()),
            imdb_rating: Some("9.3".to_string()),
            metascore: Some("82".to_string()),
            ratings: vec![Rating {
                source: "Rotten Tomatoes".to_string(),
                value: "91%".to_string(),
            }],
            found: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_details() {
        colored::control::set_override(false);
        let text = render_details(&shawshank());

        assert!(text.contains("The Shawshank Redemption"));
        assert!(text.contains("1994 • R • 142 min • movie"));
        assert!(text.contains("Genre: Drama"));
        assert!(text.contains("IMDb: 9.3/10"));
        assert!(text.contains("Metascore: 82/100"));
        assert!(text.contains("Rotten Tomatoes: 91%"));
        assert!(text.contains("Director: Frank Darabont"));
    }

    #[test]
    fn test_absent_fields_not_rendered() {
        colored::control::set_override(false);
        let text = render_details(&shawshank());

        assert!(!text.contains("N/A"));
        assert!(!text.contains("Awards:"));
        assert!(!text.contains("DVD:"));
        assert!(text.contains("Poster: 🎬"));
    }

    #[test]
    fn test_render_overlay_variants() {
        colored::control::set_override(false);
        assert_eq!(render_overlay(&Overlay::Closed), None);

        let loading = render_overlay(&Overlay::Loading { id: "tt0111161" }).unwrap();
        assert!(loading.contains("Loading movie details..."));

        let record = shawshank();
        let open = render_overlay(&Overlay::Open(&record)).unwrap();
        assert!(open.contains("IMDb ID: tt0111161"));
    }
}
