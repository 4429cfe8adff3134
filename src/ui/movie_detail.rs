use crate::app::App;
use crate::catalog::MovieDetails;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

use super::loading::render_loading;
use super::movie_list::rating_color;
use super::notice::{Notice, render_notice};

/// Renders the movie detail screen for the `:id` of the current route
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.client.is_none() {
        render_notice(frame, area, &Notice::missing_token());
        return;
    }

    if app.detail.loading {
        render_loading(frame, app, area, "Movie Details", "Fetching movie details from TMDB...");
        return;
    }

    if let Some(error) = &app.detail.error {
        render_notice(frame, area, &Notice::failure("Failed to fetch movie details", error));
        return;
    }

    if app.detail.movie.is_some() {
        render_movie_info(frame, area, app);
    } else {
        render_empty_state(frame, area);
    }
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.detail.loading_poster {
        render_loading(frame, app, area, "Poster", "Downloading poster...");
    } else if let Some(protocol) = &mut app.detail.poster {
        let image = StatefulImage::<StatefulProtocol>::default()
            .resize(Resize::Fit(None));

        let poster_block = Block::default()
            .borders(Borders::ALL)
            .title("Poster");

        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
    } else {
        let placeholder_text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "No poster available",
                Style::default().fg(Color::Gray),
            )),
        ];

        let placeholder_paragraph = Paragraph::new(placeholder_text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Poster"));

        frame.render_widget(placeholder_paragraph, area);
    }
}

/// Renders poster on the left, facts on the right
fn render_movie_info(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(title) = app.detail.movie.as_ref().map(|m| m.title.clone()) else {
        return;
    };

    let outer_block = Block::default()
        .title(format!("Movie Details - {}", title))
        .borders(Borders::ALL)
        .style(Style::default());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Poster
            Constraint::Min(20),        // Facts
        ])
        .split(inner_area);

    render_poster_section(frame, columns[0], app);

    let Some(movie) = app.detail.movie.as_ref() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title info
            Constraint::Min(5),     // Content
        ])
        .split(columns[1]);

    render_title_section(frame, rows[0], movie);
    render_content_section(frame, rows[1], movie);
}

/// Renders the title section with basic info
fn render_title_section(frame: &mut Frame, area: Rect, movie: &MovieDetails) {
    let year = movie
        .release_year()
        .map(|y| format!("({y})"))
        .unwrap_or_default();

    let mut title_info = vec![Line::from(vec![
        Span::styled(&movie.title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(year, Style::default().fg(Color::Cyan)),
    ])];

    let mut facts = vec![];
    if let Some(runtime) = movie.runtime_label() {
        facts.push(Span::styled("Runtime: ", Style::default().fg(Color::Gray)));
        facts.push(Span::styled(runtime, Style::default().fg(Color::White)));
    }
    if !movie.genres.is_empty() {
        if !facts.is_empty() {
            facts.push(Span::raw(" | "));
        }
        facts.push(Span::styled("Genre: ", Style::default().fg(Color::Gray)));
        facts.push(Span::styled(movie.genre_names(), Style::default().fg(Color::White)));
    }
    title_info.push(Line::from(facts));

    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        title_info.push(Line::from(Span::styled(
            tagline,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(title_info), area);
}

/// Renders the main content section
fn render_content_section(frame: &mut Frame, area: Rect, movie: &MovieDetails) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![];

    content.push(Line::from(Span::styled("Overview:", label)));
    let overview = if movie.overview.is_empty() {
        "No overview available"
    } else {
        movie.overview.as_str()
    };
    content.push(Line::from(Span::styled(overview, Style::default().fg(Color::White))));
    content.push(Line::from(""));

    if movie.vote_count > 0 {
        content.push(Line::from(vec![
            Span::styled("Rating: ", label),
            Span::styled(
                format!("{:.1}", movie.vote_average),
                Style::default().fg(rating_color(movie.vote_average)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({} votes)", movie.vote_count), Style::default().fg(Color::Gray)),
        ]));
    }

    if !movie.original_title.is_empty() && movie.original_title != movie.title {
        content.push(Line::from(vec![
            Span::styled("Original title: ", label),
            Span::styled(&movie.original_title, Style::default().fg(Color::White)),
        ]));
    }

    if !movie.status.is_empty() {
        content.push(Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(&movie.status, Style::default().fg(Color::White)),
        ]));
    }

    if movie.budget > 0 {
        content.push(Line::from(vec![
            Span::styled("Budget: ", label),
            Span::styled(format!("${}", movie.budget), Style::default().fg(Color::White)),
        ]));
    }

    if movie.revenue > 0 {
        content.push(Line::from(vec![
            Span::styled("Revenue: ", label),
            Span::styled(format!("${}", movie.revenue), Style::default().fg(Color::Yellow)),
        ]));
    }

    let countries = movie
        .production_countries
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let languages = movie
        .spoken_languages
        .iter()
        .map(|l| if l.name.is_empty() { l.english_name.as_str() } else { l.name.as_str() })
        .collect::<Vec<_>>()
        .join(", ");

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Language: ", Style::default().fg(Color::Gray)),
        Span::styled(languages, Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled("Country: ", Style::default().fg(Color::Gray)),
        Span::styled(countries, Style::default().fg(Color::White)),
    ]));

    if let Some(homepage) = movie.homepage.as_deref().filter(|h| !h.is_empty()) {
        content.push(Line::from(vec![
            Span::styled("Homepage: ", Style::default().fg(Color::Gray)),
            Span::styled(homepage, Style::default().fg(Color::Blue)),
        ]));
    }

    let content_paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true });

    frame.render_widget(content_paragraph, area);
}

/// Renders empty state
fn render_empty_state(frame: &mut Frame, area: Rect) {
    let empty_block = Block::default()
        .title("Movie Details")
        .borders(Borders::ALL)
        .style(Style::default());

    let empty_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No movie details available",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let empty_paragraph = Paragraph::new(empty_text)
        .block(empty_block)
        .alignment(Alignment::Center);

    frame.render_widget(empty_paragraph, area);
}
