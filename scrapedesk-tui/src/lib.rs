mod app;
mod render;

pub use app::{App, InputMode, Screen, UiOptions};
pub use render::ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use scrapedesk_core::request::{StoreRequest, StoreResponse, execute};
use scrapedesk_core::{RecordStore, StoreConfig};
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

/// Run the list/detail UI until the user quits.
///
/// Blocking: call it from a dedicated thread (e.g. `spawn_blocking`). Store
/// requests are spawned onto `runtime` and their responses are drained
/// before every redraw.
pub fn run<S: RecordStore>(
    store: S,
    config: StoreConfig,
    options: UiOptions,
    runtime: Handle,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, options);
    let dispatcher = Dispatcher::new(store, runtime);

    let result = run_app(&mut terminal, &mut app, dispatcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Spawns store requests and collects their responses, each stamped with a
/// ticket in dispatch order.
struct Dispatcher<S> {
    store: S,
    runtime: Handle,
    next_ticket: u64,
    tx: mpsc::UnboundedSender<(u64, StoreResponse)>,
    rx: mpsc::UnboundedReceiver<(u64, StoreResponse)>,
}

impl<S: RecordStore> Dispatcher<S> {
    fn new(store: S, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store,
            runtime,
            next_ticket: 1,
            tx,
            rx,
        }
    }

    fn spawn(&mut self, request: StoreRequest) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        debug!("Dispatching #{} {:?}", ticket, request);

        let store = self.store.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let response = execute(&store, request).await;
            // The UI may already be gone
            let _ = tx.send((ticket, response));
        });
    }

    fn spawn_all(&mut self, requests: Vec<StoreRequest>) {
        for request in requests {
            self.spawn(request);
        }
    }
}

fn run_app<B: ratatui::backend::Backend, S: RecordStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut dispatcher: Dispatcher<S>,
) -> Result<()> {
    dispatcher.spawn_all(app.startup_requests());

    loop {
        while let Ok((ticket, response)) = dispatcher.rx.try_recv() {
            app.apply_ticketed(ticket, response);
        }

        terminal.draw(|f| ui(f, app))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            dispatcher.spawn_all(app.handle_key(key));
        }
    }

    Ok(())
}
