use macroquad::prelude::*;

mod app;
mod data;
mod game;
mod input;
mod render;
mod ui;

use app::{run_game_frame, window_conf};
use game::{load_session, save_session, GameState};
use input::InputFacade;
use render::Renderer;

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize logging
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let catalog = match data::load_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("cannot start without a catalog: {}", e);
            return;
        }
    };

    let mut state = GameState::new(catalog);
    if let Some(saved) = load_session() {
        log::info!("restoring previous session");
        state.restore(&saved);
    }

    let renderer = Renderer::new().await;
    let mut facade = InputFacade::new();

    loop {
        // Leaving the menus is the save point
        if run_game_frame(&mut state, &mut facade, &renderer) {
            save_session(&state.save_data());
        }
        next_frame().await;
    }
}
