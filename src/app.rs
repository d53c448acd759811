// Shared application code between desktop and web builds

use macroquad::prelude::*;

use crate::game::GameState;
use crate::input::{DeviceSnapshot, InputFacade};
use crate::render::Renderer;

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Potos Market".to_string(),
        window_width: 1280,
        window_height: 720,
        fullscreen: false,
        platform: miniquad::conf::Platform {
            swap_interval: Some(0),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Run a single frame of gameplay. Returns true when the player just left
/// the menus, which is the save point.
pub fn run_game_frame(
    state: &mut GameState,
    facade: &mut InputFacade,
    renderer: &Renderer,
) -> bool {
    let delta = get_frame_time();

    // Toggle debug mode with F3
    if is_key_pressed(KeyCode::F3) {
        state.debug_mode = !state.debug_mode;
    }

    // 1. Render and get UI layout for hit detection
    clear_background(Color::from_rgba(24, 26, 34, 255));
    let layout = renderer.render(state);

    // 2. Resolve hover and clicks against the fresh layout
    let (mouse_x, mouse_y) = mouse_position();
    state.hovered = layout.hit_test(mouse_x, mouse_y).copied();
    let clicked = if is_mouse_button_pressed(MouseButton::Left) {
        state.hovered
    } else {
        None
    };

    // 3. Merge devices into one frame of logical input
    let frame = facade.poll(&DeviceSnapshot::sample(), clicked);

    // 4. Update game state
    let menus_closed = state.update(delta, &frame);

    // 5. Debug info
    if state.debug_mode {
        let player = &state.world.player;
        renderer.draw_text_sharp(&format!("FPS: {}", get_fps()), 10.0, 20.0, 16.0, WHITE);
        renderer.draw_text_sharp(state.machine.state().label(), 10.0, 40.0, 16.0, WHITE);
        renderer.draw_text_sharp(
            &format!("Pos: ({:.1}, {:.1})", player.pos.x, player.pos.y),
            10.0,
            60.0,
            16.0,
            YELLOW,
        );
        renderer.draw_text_sharp(
            &format!("Facing: ({:.0}, {:.0})", player.facing.x, player.facing.y),
            10.0,
            80.0,
            16.0,
            YELLOW,
        );
        renderer.draw_text_sharp(
            &format!("Gold: {}", state.catalog.gold()),
            10.0,
            100.0,
            16.0,
            WHITE,
        );
        renderer.draw_text_sharp(
            &format!("Input: {:?}", state.input_method),
            10.0,
            120.0,
            16.0,
            WHITE,
        );
    }

    menus_closed
}
