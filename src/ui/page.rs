//! Explorer page rendering.

use crate::core::session::{Content, SessionState};
use crate::ui::card::{build_cards, render_cards};
use crate::ui::overlay::render_overlay;
use colored::Colorize;

/// Render the full page: header, one content region, pagination and overlay.
pub fn render_page(state: &SessionState) -> String {
    let mut sections = vec![render_header(state)];

    sections.push(match state.content() {
        Content::Loading => "Searching movies...".cyan().to_string(),
        Content::Empty { has_searched } => render_empty(has_searched),
        Content::Results(_) => render_cards(&build_cards(state)),
    });

    if state.shows_pagination() {
        sections.push(render_pagination(state));
    }

    // Overlay goes last so it sits on top of the page.
    if let Some(overlay) = render_overlay(&state.overlay()) {
        sections.push(overlay);
    }

    sections.join("\n\n")
}

fn render_header(state: &SessionState) -> String {
    let query = state.query();
    format!(
        "{}\nSearch: \"{}\"  Type: {}  Year: {}",
        "Movie & Series Explorer".bold().cyan(),
        query.text,
        query
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "all".to_string()),
        query.year.as_deref().unwrap_or("any"),
    )
}

/// Empty state, with separate never-searched and no-results variants.
pub fn render_empty(has_searched: bool) -> String {
    if has_searched {
        format!(
            "{}\n{}",
            "No movies found".yellow(),
            "Try adjusting your search terms or filters to find what you're looking for."
        )
    } else {
        format!(
            "{}\n{}",
            "Welcome to Movie Explorer".bold(),
            "Search for your favorite movies and TV series to get started."
        )
    }
}

/// Prev/next controls; disabled buttons are dimmed.
pub fn render_pagination(state: &SessionState) -> String {
    let prev = if state.has_previous_page() {
        "< Prev".normal()
    } else {
        "< Prev".dimmed()
    };
    let next = if state.has_next_page() {
        "Next >".normal()
    } else {
        "Next >".dimmed()
    };
    format!(
        "{}   Page {} / {}   {}",
        prev,
        state.page(),
        state.total_pages(),
        next
    )
}
