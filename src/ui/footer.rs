use crate::app::App;
use crate::router::View;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the key hints for the current route and input mode
fn get_instruction_text(app: &App) -> &'static str {
    if app.confirm_quit {
        return "Quit? (y) to confirm, (n) to cancel";
    }
    if app.searching {
        return "(Enter) to search, (Esc) to cancel";
    }
    match app.view() {
        View::Home => "(m/Enter) browse movies, (q) quit",
        View::MovieListing => {
            if app.listing.loading {
                "Loading movies... (Esc/b) back, (q) quit"
            } else {
                "(↑↓/jk) scroll, (Enter) details, (/) search, (n/p) page, (r) reload, (Esc/b) back, (q) quit"
            }
        }
        View::MovieDetail => "(Esc/b) back, (h) home, (q) quit",
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default()))
        .block(bottom_block);

    frame.render_widget(bottom, area);
}
