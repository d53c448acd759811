pub mod catalog;
pub mod dialogue;
pub mod effects;
pub mod interaction;
pub mod session;
pub mod state;
pub mod world;

pub use catalog::{CatalogTab, CharacterFlags, EquipmentCatalog, ShopItem, OWNED_CAP};
pub use dialogue::{CancelOutcome, DialoguePhase, ShopSession, TradeMode};
pub use effects::{Effects, ScreenShake, TextFlash, TickDelay};
pub use interaction::{BuySellChoice, Ctx, InteractionMachine, InteractionState};
pub use session::{load_session, save_session, SaveData};
pub use state::GameState;
pub use world::{Interactable, InteractableId, InteractableKind, Player, World};
