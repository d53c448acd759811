//! Top-level game state: the world, the catalog, the interaction machine,
//! and feedback effects, advanced once per frame from normalized input.

use crate::game::catalog::EquipmentCatalog;
use crate::game::effects::Effects;
use crate::game::interaction::{BuySellChoice, Ctx, InteractionMachine};
use crate::game::session::SaveData;
use crate::game::world::World;
use crate::input::{InputFrame, InputMethod};
use crate::ui::UiElementId;

pub struct GameState {
    // World
    pub world: World,
    pub catalog: EquipmentCatalog,

    // Interaction flow
    pub machine: InteractionMachine,

    // Feedback
    pub fx: Effects,

    // Last device the player touched, for button hints
    pub input_method: InputMethod,

    // UI element under the mouse, resolved against last frame's layout
    pub hovered: Option<UiElementId>,

    // Debug
    pub debug_mode: bool,
}

impl GameState {
    pub fn new(catalog: EquipmentCatalog) -> Self {
        let mut state = Self {
            world: World::village(),
            catalog,
            machine: InteractionMachine::new(),
            fx: Effects::default(),
            input_method: InputMethod::Keyboard,
            hovered: None,
            debug_mode: false,
        };
        let mut ctx = Ctx {
            world: &mut state.world,
            catalog: &mut state.catalog,
            fx: &mut state.fx,
        };
        state.machine.start(&mut ctx);
        state
    }

    /// Fold a saved session back into the fresh state.
    pub fn restore(&mut self, data: &SaveData) {
        data.apply(&mut self.catalog);
        self.machine.set_last_choice(data.last_choice);
    }

    /// Snapshot for persistence.
    pub fn save_data(&self) -> SaveData {
        SaveData::capture(&self.catalog, self.machine.last_choice())
    }

    /// Advance one frame: effects, pointer selection, movement, then the
    /// interaction machine's upkeep followed by this frame's button edges.
    ///
    /// Returns true when the shop flow just closed, which is the moment to
    /// persist progress.
    pub fn update(&mut self, delta: f32, frame: &InputFrame) -> bool {
        self.input_method = frame.method;
        self.fx.update(delta);

        let was_exploring = self.machine.is_exploring();

        // Pointer selection lands before this frame's edges, so a click on
        // an option followed by confirm behaves like two separate frames.
        match frame.clicked {
            Some(UiElementId::ChoiceOption(0)) => self.machine.select_choice(BuySellChoice::Buy),
            Some(UiElementId::ChoiceOption(1)) => self.machine.select_choice(BuySellChoice::Sell),
            Some(UiElementId::WheelSlot(pos)) => self.machine.select_slot(pos),
            _ => {}
        }

        self.world.apply_movement(delta, frame.axis_x, frame.axis_y);

        let mut ctx = Ctx {
            world: &mut self.world,
            catalog: &mut self.catalog,
            fx: &mut self.fx,
        };
        self.machine.update(delta, &mut ctx);
        for edge in &frame.pressed {
            self.machine.handle(*edge, &mut ctx);
        }

        !was_exploring && self.machine.is_exploring()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::{CatalogTab, CharacterFlags, ShopItem};
    use crate::game::interaction::InteractionState;
    use crate::input::ButtonEdge;
    use macroquad::math::vec2;

    const DT: f32 = 1.0 / 60.0;

    fn test_catalog() -> EquipmentCatalog {
        let item = |name: &str, cost: u32, owned: u16| ShopItem {
            name: name.to_string(),
            cost,
            owned,
            usable_by: CharacterFlags::all(),
            effect: None,
        };
        EquipmentCatalog::new(
            vec![item("Sword", 100, 0), item("Shield", 60, 0)],
            vec![item("Herb", 10, 2)],
            120,
        )
    }

    fn frame(pressed: &[ButtonEdge]) -> InputFrame {
        InputFrame {
            pressed: pressed.to_vec(),
            axis_x: 0.0,
            axis_y: 0.0,
            method: InputMethod::Keyboard,
            clicked: None,
        }
    }

    fn shop_state() -> GameState {
        let mut state = GameState::new(test_catalog());
        state.world.player.pos = vec2(8.0, 5.5);
        state.world.player.facing = vec2(0.0, -1.0);
        state
    }

    #[test]
    fn test_walk_up_and_interact_in_one_frame() {
        let mut state = GameState::new(test_catalog());
        // Just out of range; one frame of walking north closes the gap
        state.world.player.pos = vec2(8.0, 6.7);

        let mut walk = frame(&[ButtonEdge::Interact]);
        walk.axis_y = 1.0;
        state.update(0.1, &walk);

        assert!(matches!(
            state.machine.state(),
            InteractionState::BuySellMenu { .. }
        ));
    }

    #[test]
    fn test_movement_ignored_while_menus_open() {
        let mut state = shop_state();
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        let parked = state.world.player.pos;

        let mut push = frame(&[]);
        push.axis_x = 1.0;
        state.update(DT, &push);
        assert_eq!(state.world.player.pos, parked);
    }

    #[test]
    fn test_click_selects_then_edges_apply() {
        let mut state = shop_state();
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        assert!(matches!(state.machine.state(), InteractionState::BuyMenu { .. }));

        // Click the second wheel slot and confirm on the same frame
        let mut click = frame(&[ButtonEdge::Interact]);
        click.clicked = Some(UiElementId::WheelSlot(1));
        state.update(DT, &click);

        let session = state.machine.session().unwrap();
        assert_eq!(session.selected_pos(), 1);
        assert_eq!(
            session.selected_index().map(|i| {
                state.catalog.item(CatalogTab::Equipment, i).unwrap().name.clone()
            }),
            Some("Shield".to_string())
        );
    }

    #[test]
    fn test_update_reports_save_point_when_shop_closes() {
        let mut state = shop_state();
        assert!(!state.update(DT, &frame(&[ButtonEdge::Interact])));
        assert!(!state.update(DT, &frame(&[ButtonEdge::Interact])));
        assert!(!state.update(DT, &frame(&[ButtonEdge::Cancel])));

        // Cancel out of the choice menu back to exploration
        assert!(state.update(DT, &frame(&[ButtonEdge::Cancel])));
        assert!(!state.update(DT, &frame(&[])));
    }

    #[test]
    fn test_save_data_round_trips_through_restore() {
        let mut state = shop_state();
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        state.update(DT, &frame(&[ButtonEdge::Interact]));
        assert_eq!(state.catalog.gold(), 20);

        let data = state.save_data();
        let mut revived = GameState::new(test_catalog());
        revived.restore(&data);
        assert_eq!(revived.catalog.gold(), 20);
        assert_eq!(
            revived.catalog.item(CatalogTab::Equipment, 0).map(|i| i.owned),
            Some(1)
        );
    }
}
