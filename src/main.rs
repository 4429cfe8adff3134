use std::error::Error;
use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;

use pelis_tui::app::App;
use pelis_tui::config::Config;
use pelis_tui::logging::init_logging;
use pelis_tui::router::{View, paths};
use pelis_tui::ui;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    init_logging(&config.log_filter, config.log_file().as_deref())?;
    tracing::info!(
        base_url = %config.catalog.base_url,
        locale = %config.catalog.locale,
        token = config.has_token(),
        "starting"
    );

    let app = App::new(&config)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // must run after entering the alternate screen, it queries the terminal
    let picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());
    let mut app = app.with_picker(picker);

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "terminal loop failed");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Check for results from the background fetches
        app.poll_messages();
        app.throbber_state.calc_next();

        // Poll for events with a timeout to allow UI updates
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            // Skip events that are not KeyEventKind::Press
            continue;
        }

        if app.confirm_quit {
            match key.code {
                KeyCode::Char('y') => return Ok(()),
                KeyCode::Char('n') | KeyCode::Esc => app.confirm_quit = false,
                _ => {}
            }
            continue;
        }

        // Handle search input when searching is active
        if app.searching {
            match key.code {
                KeyCode::Char(c) => app.search_input.push(c),
                KeyCode::Backspace => {
                    app.search_input.pop();
                }
                KeyCode::Enter => app.submit_search(),
                KeyCode::Esc => app.cancel_search(),
                _ => {}
            }
            continue;
        }

        if key.code == KeyCode::Char('q') {
            app.confirm_quit = true;
            continue;
        }

        match app.view() {
            View::Home => match key.code {
                KeyCode::Char('m') | KeyCode::Enter => app.navigate(paths::MOVIES),
                _ => {}
            },
            View::MovieListing => match key.code {
                KeyCode::Down | KeyCode::Char('j') => app.next_movie(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_movie(),
                KeyCode::Right | KeyCode::Char('n') => app.next_page(),
                KeyCode::Left | KeyCode::Char('p') => app.previous_page(),
                KeyCode::Enter => app.open_selected(),
                KeyCode::Char('/') | KeyCode::Char('s') => app.start_search(),
                KeyCode::Char('r') => app.reload(),
                KeyCode::Esc | KeyCode::Char('b') => app.back(),
                _ => {}
            },
            View::MovieDetail => match key.code {
                KeyCode::Esc | KeyCode::Char('b') => app.back(),
                KeyCode::Char('h') => app.navigate(paths::HOME),
                KeyCode::Char('r') => app.reload(),
                _ => {}
            },
        }
    }
}
