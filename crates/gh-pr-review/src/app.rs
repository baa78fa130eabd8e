//! Terminal setup and the main event loop

use crate::keymap;
use anyhow::Result;
use gh_review_core::{
    DefaultTheme, RepositoryClient, ReviewAction, ReviewScreen, ReviewSession, SessionEvent,
};
use log::{debug, info, warn};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::Rect,
    Terminal,
};
use std::io;
use std::time::Duration;

type Backend = CrosstermBackend<io::Stdout>;

/// Run the review UI until the user closes it
pub async fn run<C>(session: ReviewSession, client: &C) -> Result<()>
where
    C: RepositoryClient + ?Sized,
{
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<C>(
    terminal: &mut Terminal<Backend>,
    mut session: ReviewSession,
    client: &C,
) -> Result<()>
where
    C: RepositoryClient + ?Sized,
{
    let theme = DefaultTheme;

    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        session.handle_action(ReviewAction::SetViewport {
            height: ReviewScreen::<DefaultTheme>::diff_height(area),
        });

        terminal.draw(|frame| {
            frame.render_widget(ReviewScreen::new(&session, &theme), frame.area());
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only process key press events (ignore key release)
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = keymap::map_key(key, session.input_mode()) else {
            continue;
        };

        for event in session.handle_action(action) {
            match event {
                SessionEvent::SubmitReview { decision, body } => {
                    // The session keeps its pending annotations on failure
                    if let Err(err) = session.submit_review(client, decision, body).await {
                        warn!("{}", err);
                    }
                }
                SessionEvent::Close => {
                    info!(
                        "Closing review with {} pending annotations",
                        session.pending().count()
                    );
                    return Ok(());
                }
                other => debug!("{:?}", other),
            }
        }
    }
}
