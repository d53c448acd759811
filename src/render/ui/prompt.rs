//! Exploration overlays: the proximity bubble and the buy/sell choice menu

use macroquad::prelude::*;

use crate::game::{BuySellChoice, GameState, InteractableId};
use crate::input::InputMethod;
use crate::ui::{UiElementId, UiLayout};
use super::super::{Renderer, TILE_SIZE};
use super::common::*;

impl Renderer {
    /// Small "!" bubble over a nearby interactable, plus an action hint
    /// once the player actually faces it.
    pub(crate) fn render_interaction_prompt(
        &self,
        state: &GameState,
        target: InteractableId,
        origin: Vec2,
    ) {
        let Some(spot) = state.world.interactable(target) else {
            return;
        };
        let center = origin + spot.pos * TILE_SIZE;

        let bubble_w = 22.0;
        let bubble_h = 26.0;
        let bx = (center.x - bubble_w / 2.0).floor();
        let by = (center.y - TILE_SIZE * 1.35).floor();
        draw_dialog_panel(bx, by, bubble_w, bubble_h);
        self.draw_text_sharp("!", bx + 8.0, by + 19.0, 16.0, TEXT_SELECTED);

        if state.world.is_facing(target) {
            let key = match state.input_method {
                InputMethod::Keyboard => "L",
                InputMethod::Controller => "A",
            };
            let verb = if spot.kind.is_shop() { "Talk" } else { "Read" };
            let hint = format!("{} {}", key, verb);
            let hint_w = self.measure_text_sharp(&hint, 12.0).width;
            self.draw_text_sharp(
                &hint,
                (center.x - hint_w / 2.0).floor(),
                by + bubble_h + 16.0,
                12.0,
                TEXT_NORMAL,
            );
        }
    }

    /// Two-row Buy/Sell picker shown after greeting the shopkeeper. The
    /// window frame goes up at once; the options fill in once the reveal
    /// delay has passed.
    pub(crate) fn render_choice_menu(
        &self,
        state: &GameState,
        choice: BuySellChoice,
        revealed: bool,
        layout: &mut UiLayout,
    ) {
        let w = 260.0;
        let h = 132.0;
        let x = ((screen_width() - w) / 2.0).floor();
        let y = (screen_height() - h - 90.0).floor();
        draw_dialog_panel(x, y, w, h);

        let hint = match state.input_method {
            InputMethod::Keyboard => "L Select    K Leave",
            InputMethod::Controller => "A Select    B Leave",
        };
        self.draw_text_sharp(hint, x + 14.0, y + h - 14.0, 12.0, TEXT_DIM);

        if !revealed {
            return;
        }

        let options = [(BuySellChoice::Buy, 0u8), (BuySellChoice::Sell, 1u8)];
        let mut row_y = y + 18.0;
        for (option, slot) in options {
            let id = UiElementId::ChoiceOption(slot);
            layout.add(id, Rect::new(x + 14.0, row_y, w - 28.0, 30.0));

            let selected = option == choice;
            let hovered = state.hovered == Some(id);
            if selected {
                let px = x + 26.0;
                let py = row_y + 15.0;
                draw_triangle(
                    vec2(px, py - 7.0),
                    vec2(px, py + 7.0),
                    vec2(px + 10.0, py),
                    TEXT_SELECTED,
                );
            }
            let color = if selected {
                TEXT_SELECTED
            } else if hovered {
                TEXT_NORMAL
            } else {
                TEXT_DIM
            };
            self.draw_text_sharp(option.label(), x + 48.0, row_y + 21.0, 18.0, color);
            row_y += 34.0;
        }
    }
}
