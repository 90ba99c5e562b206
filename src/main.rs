mod app;
mod handler;
mod tui;
mod ui;

use anyhow::Result;
use clap::Parser;

use babybot::controller::ConversationController;

use crate::app::App;
use crate::tui::AppEvent;

#[derive(Parser)]
#[command(name = "babybot")]
#[command(about = "Terminal chat client for xAI's Grok models")]
struct Cli {
    /// Model identifier to chat with (overrides the config file)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(cli.model);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(AppEvent::Key(key)) => handler::handle_key(app, key),
            Some(AppEvent::Tick) => {
                let was_loading = app.controller.is_loading();
                app.controller.poll();
                app.tick_animation();
                // Follow the reply once it lands
                if was_loading && !app.controller.is_loading() {
                    app.scroll_to_bottom();
                }
            }
            Some(AppEvent::Resize) => {}
            None => break,
        }
    }

    Ok(())
}
