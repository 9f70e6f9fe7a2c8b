//! Result cards.

use crate::core::controller::UserEvent;
use crate::core::session::SessionState;
use crate::models::catalog::SearchResultItem;
use crate::utils::text::truncate;
use colored::Colorize;

const TITLE_WIDTH: usize = 60;

/// What a card shows in place of artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artwork<'a> {
    Poster(&'a str),
    Placeholder,
}

/// One selectable result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    /// 1-based position on the page.
    pub number: usize,
    pub item: &'a SearchResultItem,
    pub artwork: Artwork<'a>,
}

impl<'a> Card<'a> {
    pub fn new(number: usize, item: &'a SearchResultItem, poster_failed: bool) -> Self {
        let artwork = match item.poster_url.as_deref() {
            Some(url) if !poster_failed => Artwork::Poster(url),
            _ => Artwork::Placeholder,
        };
        Self {
            number,
            item,
            artwork,
        }
    }

    /// Event emitted when this card is chosen.
    pub fn select_event(&self) -> UserEvent {
        UserEvent::Select(self.item.id.clone())
    }

    /// Placeholder text shown when no artwork is available.
    pub fn placeholder(&self) -> String {
        format!("[🎬 {}]", self.item.title)
    }
}

/// Build cards for the current result list.
pub fn build_cards(state: &SessionState) -> Vec<Card<'_>> {
    state
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| Card::new(i + 1, item, state.poster_failed(&item.id)))
        .collect()
}

/// Render one card.
pub fn render_card(card: &Card<'_>) -> String {
    let artwork = match card.artwork {
        Artwork::Poster(url) => url.dimmed().to_string(),
        Artwork::Placeholder => card.placeholder(),
    };

    format!(
        "{:>3}. {}\n     {} • {}\n     {}",
        card.number,
        truncate(&card.item.title, TITLE_WIDTH).bold(),
        card.item.kind,
        card.item.year,
        artwork
    )
}

/// Render the whole card grid.
pub fn render_cards(cards: &[Card<'_>]) -> String {
    cards
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::MediaKind;

    fn item(poster: Option<&str>) -> SearchResultItem {
        SearchResultItem {
            id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            kind: MediaKind::Movie,
            poster_url: poster.map(str::to_string),
        }
    }

    #[test]
    fn test_card_with_poster() {
        colored::control::set_override(false);
        let item = item(Some("https://img.example/shawshank.jpg"));
        let card = Card::new(1, &item, false);

        assert_eq!(card.artwork, Artwork::Poster("https://img.example/shawshank.jpg"));
        let text = render_card(&card);
        assert!(text.contains("The Shawshank Redemption"));
        assert!(text.contains("movie • 1994"));
        assert!(text.contains("https://img.example/shawshank.jpg"));
    }

    #[test]
    fn test_card_placeholder_without_poster() {
        colored::control::set_override(false);
        let item = item(None);
        let card = Card::new(2, &item, false);

        assert_eq!(card.artwork, Artwork::Placeholder);
        assert!(render_card(&card).contains("[🎬 The Shawshank Redemption]"));
    }

    #[test]
    fn test_card_placeholder_after_poster_failure() {
        let item = item(Some("https://img.example/broken.jpg"));
        let card = Card::new(1, &item, true);
        assert_eq!(card.artwork, Artwork::Placeholder);
    }

    #[test]
    fn test_card_select_event() {
        let item = item(None);
        let card = Card::new(1, &item, false);
        assert_eq!(card.select_event(), UserEvent::Select("tt0111161".to_string()));
    }
}
