use crate::app::App;
use crate::catalog::MovieSummary;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::loading::render_loading;
use super::notice::{Notice, render_notice};

/// Renders the movie listing: popular movies or the results of a search
pub fn render_movie_list(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.client.is_none() {
        render_notice(frame, area, &Notice::missing_token());
        return;
    }

    if app.listing.loading {
        let label = match &app.listing.query {
            Some(query) => format!("Searching \"{}\" (page {})...", query, app.listing.page),
            None => format!("Loading popular movies (page {})...", app.listing.page),
        };
        render_loading(frame, app, area, "Movies", &label);
        return;
    }

    if let Some(error) = &app.listing.error {
        render_notice(frame, area, &Notice::failure("Failed to load movies", error));
        return;
    }

    if app.listing.movies.is_empty() {
        let empty_block = Block::default()
            .title("No movies found - press '/' to search or 'r' to reload")
            .borders(Borders::ALL)
            .style(Style::default());

        frame.render_widget(empty_block, area);
        return;
    }

    let heading = match &app.listing.query {
        Some(query) => format!("Results for \"{}\"", query),
        None => "Popular".to_string(),
    };
    let updated = app
        .listing
        .last_updated
        .map(|t| format!(" - updated {}", t.format("%H:%M")))
        .unwrap_or_default();
    let title = format!(
        "{} ({} movies, page {}/{}){}",
        heading,
        app.listing.total_results,
        app.listing.page,
        app.listing.total_pages.max(1),
        updated
    );

    let items: Vec<ListItem> = app.listing.movies.iter().map(movie_item).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.listing.list_state);
}

fn movie_item(movie: &MovieSummary) -> ListItem<'_> {
    let year = movie
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled(
            movie.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(year, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  ★ {:.1}", movie.vote_average),
            Style::default().fg(rating_color(movie.vote_average)),
        ),
    ])];

    if !movie.overview.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate(&movie.overview, 110)),
            Style::default().fg(Color::Gray),
        )));
    }

    ListItem::new(lines)
}

pub(super) fn rating_color(score: f64) -> Color {
    if score >= 7.0 {
        Color::Green
    } else if score >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("áéíóú y más", 5), "áéíóú…");
    }

    #[test]
    fn rating_bands() {
        assert_eq!(rating_color(8.2), Color::Green);
        assert_eq!(rating_color(5.0), Color::Yellow);
        assert_eq!(rating_color(3.1), Color::Red);
    }
}
