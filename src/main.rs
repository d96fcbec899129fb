use std::time::Duration;

use anyhow::Result;
use crossterm::event::EventStream;
use futures_util::StreamExt;

mod api;
mod app;
mod backend;
mod conversation;
mod format;
mod handler;
mod tui;
mod ui;

use api::Endpoints;
use app::App;
use backend::BackendClient;

#[tokio::main]
async fn main() -> Result<()> {
    let endpoints = Endpoints::resolve();
    let mut app = App::new(BackendClient::new(endpoints));
    app.start_health_probe();

    let mut terminal = tui::TerminalGuard::enter()?;
    run(&mut terminal, &mut app).await
}

/// Draw, then wait for either terminal input or the next tick. Ticks
/// (300ms) advance the typing indicator and poll the in-flight health and
/// chat tasks for completion.
async fn run(terminal: &mut tui::TerminalGuard, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(300));

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        tokio::select! {
            event = events.next() => {
                if let Some(Ok(event)) = event {
                    handler::handle_event(app, event);
                }
            }
            _ = ticker.tick() => {
                app.tick_animation();
                app.poll_tasks().await;
            }
        }
    }

    Ok(())
}
