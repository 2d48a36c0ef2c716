//! Rayna TUI Application
//!
//! A terminal storefront for browsing products and nearby shops.

use crossterm::event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

use rayna_store::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use rayna_store::{logging, Config, ProductLoader};

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if state.take_redraw() {
            terminal.draw(|f| render(f, state))?;
        }

        process_state(state);

        if state.should_quit {
            return Ok(());
        }

        if event::poll(tick_rate)? {
            let event = event::read()?;
            handle_event(event, state);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let loader = ProductLoader::from_boxed(config.product_source()?);
    tracing::info!(source = %loader.source().describe(), "starting rayna-tui");
    let mut state = AppState::new(loader);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut state, config.tick_rate());
    restore_terminal(&mut terminal)?;

    result
}
