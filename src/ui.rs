mod footer;
mod header;
mod home;
mod loading;
mod movie_detail;
mod movie_list;
mod notice;

use crate::app::App;
use crate::router::View;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use footer::render_footer;
use header::render_header;
use home::render_home;
use movie_detail::render_movie_detail;
use movie_list::render_movie_list;

/// Draws header, the view for the current route, and footer.
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(1),     // Content
            Constraint::Length(3),  // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.view() {
        View::Home => render_home(frame, app, chunks[1]),
        View::MovieListing => render_movie_list(frame, app, chunks[1]),
        View::MovieDetail => render_movie_detail(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}
