//! Interaction state machine.
//!
//! One closed enum covers the whole flow from walking around to trading:
//! Exploration, standing near something interactable, the opening beat of
//! a conversation, the buy/sell choice, and the two trade menus. Menu
//! states own their [`ShopSession`] directly, so there is no shared
//! scratch space to reset between visits.
//!
//! Transitions run exit-then-enter. An enter hook may immediately yield a
//! follow-up state (talking to the shopkeeper falls straight through to
//! the choice menu), which is applied in the same call.

use log::info;
use serde::{Deserialize, Serialize};

use crate::game::catalog::{CatalogTab, EquipmentCatalog};
use crate::game::dialogue::{CancelOutcome, ShopSession, TradeMode};
use crate::game::effects::{Effects, TickDelay};
use crate::game::world::{InteractableId, World};
use crate::input::ButtonEdge;

/// The two options on the opening choice menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuySellChoice {
    #[default]
    Buy,
    Sell,
}

impl BuySellChoice {
    pub fn label(&self) -> &'static str {
        match self {
            BuySellChoice::Buy => "Buy",
            BuySellChoice::Sell => "Sell",
        }
    }

    fn trade_mode(&self) -> TradeMode {
        match self {
            BuySellChoice::Buy => TradeMode::Buy,
            BuySellChoice::Sell => TradeMode::Sell,
        }
    }
}

#[derive(Debug, Clone)]
pub enum InteractionState {
    Exploration,
    NearInteractable {
        target: InteractableId,
    },
    InitialInteraction,
    BuySellMenu {
        choice: BuySellChoice,
        /// Confirm is ignored until this runs out, so the press that opened
        /// the menu cannot also commit a choice.
        reveal: TickDelay,
    },
    BuyMenu {
        session: ShopSession,
    },
    SellMenu {
        session: ShopSession,
    },
}

impl InteractionState {
    /// Short name for the debug overlay.
    pub fn label(&self) -> &'static str {
        match self {
            InteractionState::Exploration => "Exploration",
            InteractionState::NearInteractable { .. } => "NearInteractable",
            InteractionState::InitialInteraction => "InitialInteraction",
            InteractionState::BuySellMenu { .. } => "BuySellMenu",
            InteractionState::BuyMenu { .. } => "BuyMenu",
            InteractionState::SellMenu { .. } => "SellMenu",
        }
    }
}

/// Everything a transition is allowed to touch, borrowed per call.
pub struct Ctx<'a> {
    pub world: &'a mut World,
    pub catalog: &'a mut EquipmentCatalog,
    pub fx: &'a mut Effects,
}

#[derive(Debug)]
pub struct InteractionMachine {
    state: InteractionState,
    /// Highlighted option the next time the choice menu opens.
    last_choice: BuySellChoice,
    /// Catalog tab carried between menu visits.
    tab: CatalogTab,
    last_target: Option<InteractableId>,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Exploration,
            last_choice: BuySellChoice::Buy,
            tab: CatalogTab::Equipment,
            last_target: None,
        }
    }

    /// Run the initial state's enter hook. Call once before the first tick.
    pub fn start(&mut self, ctx: &mut Ctx) {
        if let Some(next) = self.enter(ctx) {
            self.transition(next, ctx);
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn last_choice(&self) -> BuySellChoice {
        self.last_choice
    }

    /// Seed the remembered choice-menu option, e.g. from a saved session.
    pub fn set_last_choice(&mut self, choice: BuySellChoice) {
        self.last_choice = choice;
    }

    /// Active trade session, if a buy or sell menu is open.
    pub fn session(&self) -> Option<&ShopSession> {
        match &self.state {
            InteractionState::BuyMenu { session } | InteractionState::SellMenu { session } => {
                Some(session)
            }
            _ => None,
        }
    }

    /// True while the player is free to walk around.
    pub fn is_exploring(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Exploration | InteractionState::NearInteractable { .. }
        )
    }

    /// Per-tick upkeep. Runs before this tick's button edges are handled,
    /// so a press can act on what the player sees this frame.
    pub fn update(&mut self, dt: f32, ctx: &mut Ctx) {
        let next = match &mut self.state {
            InteractionState::Exploration => ctx
                .world
                .nearest_interactable()
                .map(|target| InteractionState::NearInteractable { target }),
            InteractionState::NearInteractable { target } => {
                match ctx.world.nearest_interactable() {
                    None => Some(InteractionState::Exploration),
                    Some(now) if now != *target => {
                        Some(InteractionState::NearInteractable { target: now })
                    }
                    Some(_) => None,
                }
            }
            // Only non-trading targets rest here; the conversation is over
            // by the next tick.
            InteractionState::InitialInteraction => Some(InteractionState::Exploration),
            InteractionState::BuySellMenu { reveal, .. } => {
                reveal.tick();
                None
            }
            InteractionState::BuyMenu { session } | InteractionState::SellMenu { session } => {
                session.tick(dt);
                None
            }
        };
        if let Some(next) = next {
            self.transition(next, ctx);
        }
    }

    /// Route one button edge to the current state.
    pub fn handle(&mut self, edge: ButtonEdge, ctx: &mut Ctx) {
        let next = match (&mut self.state, edge) {
            (InteractionState::NearInteractable { target }, ButtonEdge::Interact) => {
                let target = *target;
                if ctx.world.is_facing(target) {
                    if let Some(spot) = ctx.world.interactable(target) {
                        let (name, pos) = (spot.name.clone(), spot.pos);
                        ctx.world.face_towards(pos);
                        info!("interacting with {}", name);
                    }
                    self.last_target = Some(target);
                    Some(InteractionState::InitialInteraction)
                } else {
                    None
                }
            }
            (InteractionState::BuySellMenu { choice, reveal }, edge) => {
                let ready = reveal.done();
                match edge {
                    ButtonEdge::Interact if ready => {
                        let committed = *choice;
                        self.last_choice = committed;
                        Some(open_menu(committed, self.tab, ctx.catalog))
                    }
                    // Backing out works even during the reveal delay.
                    ButtonEdge::Cancel => Some(InteractionState::Exploration),
                    ButtonEdge::NavigateLeft if ready => {
                        *choice = BuySellChoice::Buy;
                        None
                    }
                    ButtonEdge::NavigateRight if ready => {
                        *choice = BuySellChoice::Sell;
                        None
                    }
                    _ => None,
                }
            }
            (
                InteractionState::BuyMenu { session } | InteractionState::SellMenu { session },
                edge,
            ) => match edge {
                ButtonEdge::Interact => {
                    session.confirm(ctx.catalog, ctx.fx);
                    None
                }
                ButtonEdge::Cancel => {
                    let outcome = session.cancel(ctx.catalog);
                    match outcome {
                        CancelOutcome::Consumed => None,
                        CancelOutcome::Exit => Some(InteractionState::BuySellMenu {
                            choice: self.last_choice,
                            reveal: TickDelay::new(1),
                        }),
                    }
                }
                ButtonEdge::TabLeft => {
                    session.switch_tab(CatalogTab::Equipment, ctx.catalog);
                    None
                }
                ButtonEdge::TabRight => {
                    session.switch_tab(CatalogTab::Items, ctx.catalog);
                    None
                }
                ButtonEdge::NavigateLeft => {
                    session.navigate_left();
                    None
                }
                ButtonEdge::NavigateRight => {
                    session.navigate_right();
                    None
                }
            },
            _ => None,
        };
        if let Some(next) = next {
            self.transition(next, ctx);
        }
    }

    /// Mouse-driven selection of a choice-menu option.
    pub fn select_choice(&mut self, choice: BuySellChoice) {
        if let InteractionState::BuySellMenu { choice: current, reveal } = &mut self.state {
            if reveal.done() {
                *current = choice;
            }
        }
    }

    /// Mouse-driven selection of a wheel slot in an open trade menu.
    pub fn select_slot(&mut self, view_pos: usize) {
        match &mut self.state {
            InteractionState::BuyMenu { session } | InteractionState::SellMenu { session } => {
                session.select(view_pos);
            }
            _ => {}
        }
    }

    fn transition(&mut self, next: InteractionState, ctx: &mut Ctx) {
        let mut pending = Some(next);
        while let Some(state) = pending.take() {
            let previous = std::mem::replace(&mut self.state, state);
            self.exit(previous);
            pending = self.enter(ctx);
        }
    }

    fn exit(&mut self, previous: InteractionState) {
        match previous {
            InteractionState::BuyMenu { session } | InteractionState::SellMenu { session } => {
                self.tab = session.tab();
            }
            _ => {}
        }
    }

    fn enter(&mut self, ctx: &mut Ctx) -> Option<InteractionState> {
        match &self.state {
            InteractionState::Exploration => {
                ctx.world.set_movement_enabled(true);
                None
            }
            InteractionState::InitialInteraction => {
                ctx.world.set_movement_enabled(false);
                let spot = self.last_target.and_then(|id| ctx.world.interactable(id));
                match spot {
                    Some(spot) if spot.kind.is_shop() => Some(InteractionState::BuySellMenu {
                        choice: self.last_choice,
                        reveal: TickDelay::new(1),
                    }),
                    Some(spot) => {
                        info!("{} offers nothing to trade", spot.name);
                        None
                    }
                    None => None,
                }
            }
            _ => None,
        }
    }
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn open_menu(
    choice: BuySellChoice,
    tab: CatalogTab,
    catalog: &EquipmentCatalog,
) -> InteractionState {
    let session = ShopSession::new(choice.trade_mode(), tab, catalog);
    match choice {
        BuySellChoice::Buy => InteractionState::BuyMenu { session },
        BuySellChoice::Sell => InteractionState::SellMenu { session },
    }
}
