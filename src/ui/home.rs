use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Min(3),
        ])
        .split(inner);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Full)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .lines(vec!["PELIS".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big_text, chunks[1]);

    let mut text = vec![
        Line::from(Span::styled(
            "Popular movies, search and details from TMDB",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (m) or (Enter) to browse movies",
            Style::default().fg(Color::Gray),
        )),
    ];
    if app.client.is_none() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "No access token configured: the catalog is unavailable",
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), chunks[2]);
}
