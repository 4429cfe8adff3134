use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the title bar with the current route, or the search prompt while typing
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let line = if app.searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(app.search_input.as_str()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Pelis", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(app.router.current().path.as_str(), Style::default().fg(Color::Gray)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(title_block), area);
}
