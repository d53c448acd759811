use macroquad::prelude::*;

use crate::game::{GameState, InteractableKind, InteractionState};
use crate::ui::UiLayout;
use super::font::PixelFont;

/// Screen pixels per world tile
pub const TILE_SIZE: f32 = 48.0;

// Ground and entity palette; the build ships no textures, so the world is
// drawn from flat shapes.
const GRASS_LIGHT: Color = Color::new(0.345, 0.557, 0.314, 1.0);
const GRASS_DARK: Color = Color::new(0.302, 0.502, 0.275, 1.0);
const WORLD_EDGE: Color = Color::new(0.188, 0.322, 0.180, 1.0);
const PLAYER_BODY: Color = Color::new(0.231, 0.431, 0.784, 1.0);
const PLAYER_TRIM: Color = Color::new(0.137, 0.263, 0.518, 1.0);
const SHOPKEEPER_BODY: Color = Color::new(0.784, 0.306, 0.243, 1.0);
const SHOPKEEPER_TRIM: Color = Color::new(0.518, 0.180, 0.137, 1.0);
const SIGN_BODY: Color = Color::new(0.557, 0.408, 0.231, 1.0);
const SIGN_TRIM: Color = Color::new(0.369, 0.263, 0.137, 1.0);

pub struct Renderer {
    /// Pixel font for sharp text at small sizes
    font: PixelFont,
}

impl Renderer {
    pub async fn new() -> Self {
        Self {
            font: PixelFont::load_or_default("assets/fonts/market.ttf").await,
        }
    }

    /// Draw text with the pixel font for sharp rendering
    pub fn draw_text_sharp(&self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        self.font.draw_text(text, x, y, font_size, color);
    }

    /// Measure text with the pixel font
    pub(crate) fn measure_text_sharp(&self, text: &str, font_size: f32) -> TextDimensions {
        self.font.measure_text(text, font_size)
    }

    /// Render one frame and return the clickable layout for hit detection
    pub fn render(&self, state: &GameState) -> UiLayout {
        let mut layout = UiLayout::new();

        // Camera shake displaces the whole world, menus stay put
        let origin = self.world_origin(state) + state.fx.shake.offset() * TILE_SIZE;
        self.render_world(state, origin);

        match state.machine.state() {
            InteractionState::NearInteractable { target } => {
                self.render_interaction_prompt(state, *target, origin);
            }
            InteractionState::BuySellMenu { choice, reveal } => {
                self.render_choice_menu(state, *choice, reveal.done(), &mut layout);
            }
            InteractionState::BuyMenu { session } | InteractionState::SellMenu { session } => {
                self.render_shop(state, session, &mut layout);
            }
            _ => {}
        }

        layout
    }

    fn world_origin(&self, state: &GameState) -> Vec2 {
        vec2(
            ((screen_width() - state.world.width * TILE_SIZE) / 2.0).floor(),
            ((screen_height() - state.world.height * TILE_SIZE) / 2.0).floor(),
        )
    }

    fn render_world(&self, state: &GameState, origin: Vec2) {
        let cols = state.world.width as i32;
        let rows = state.world.height as i32;

        // Frame behind the map so shake never reveals the clear color
        draw_rectangle(
            origin.x - 8.0,
            origin.y - 8.0,
            cols as f32 * TILE_SIZE + 16.0,
            rows as f32 * TILE_SIZE + 16.0,
            WORLD_EDGE,
        );

        for ty in 0..rows {
            for tx in 0..cols {
                let color = if (tx + ty) % 2 == 0 { GRASS_LIGHT } else { GRASS_DARK };
                draw_rectangle(
                    origin.x + tx as f32 * TILE_SIZE,
                    origin.y + ty as f32 * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                    color,
                );
            }
        }

        for spot in &state.world.interactables {
            let (body, trim) = match spot.kind {
                InteractableKind::Shopkeeper => (SHOPKEEPER_BODY, SHOPKEEPER_TRIM),
                InteractableKind::Sign => (SIGN_BODY, SIGN_TRIM),
            };
            self.draw_figure(origin + spot.pos * TILE_SIZE, body, trim);
        }

        let player = &state.world.player;
        self.draw_figure(origin + player.pos * TILE_SIZE, PLAYER_BODY, PLAYER_TRIM);

        // Notch on the edge the player is facing
        let notch = origin + player.pos * TILE_SIZE + player.facing * (TILE_SIZE * 0.38);
        draw_rectangle(notch.x - 5.0, notch.y - 5.0, 10.0, 10.0, PLAYER_TRIM);
    }

    /// A unit on the map: bordered square, slightly smaller than a tile
    fn draw_figure(&self, center: Vec2, body: Color, trim: Color) {
        let size = TILE_SIZE * 0.7;
        let x = center.x - size / 2.0;
        let y = center.y - size / 2.0;
        draw_rectangle(x - 2.0, y - 2.0, size + 4.0, size + 4.0, trim);
        draw_rectangle(x, y, size, size, body);
    }
}
