//! Buy/Sell Dialogue
//!
//! The nested phase machine that runs inside the buy and sell menus:
//! idle → confirming → success / insufficient-funds / restricted-item /
//! inventory-limit, with every notification acknowledged through Confirm.
//! Holds the filtered item view and the selection the wheel renders.

use log::{debug, info};

use super::catalog::{CatalogTab, EquipmentCatalog, OWNED_CAP};
use super::effects::{
    Effects, TextFlash, COST_FLASH_COUNT, COST_FLASH_INTERVAL, QUANTITY_FLASH_COUNT,
    QUANTITY_FLASH_INTERVAL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeMode {
    Buy,
    Sell,
}

/// Mutually exclusive dialogue phases. Navigation and tab switching only
/// work in `Idle`; everything else needs a Confirm to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    Idle,
    Confirming,
    PurchaseSuccess,
    SellSuccess,
    InsufficientFunds,
    RestrictedItem,
    InventoryLimit,
}

impl DialoguePhase {
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            DialoguePhase::PurchaseSuccess
                | DialoguePhase::SellSuccess
                | DialoguePhase::InsufficientFunds
                | DialoguePhase::RestrictedItem
                | DialoguePhase::InventoryLimit
        )
    }
}

/// What a Cancel press did inside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Handled internally (reverted a confirmation, dismissed a success, or
    /// was suppressed by an error phase).
    Consumed,
    /// Nothing to unwind; the caller should leave the menu.
    Exit,
}

/// One visit to the buy or sell menu.
#[derive(Debug, Clone)]
pub struct ShopSession {
    pub mode: TradeMode,
    tab: CatalogTab,
    /// Catalog indices currently on display, in catalog order.
    visible: Vec<usize>,
    selected: usize,
    phase: DialoguePhase,
    pub cost_flash: TextFlash,
    pub quantity_flash: TextFlash,
}

impl ShopSession {
    pub fn new(mode: TradeMode, tab: CatalogTab, catalog: &EquipmentCatalog) -> Self {
        let mut session = Self {
            mode,
            tab,
            visible: Vec::new(),
            selected: 0,
            phase: DialoguePhase::Idle,
            cost_flash: TextFlash::default(),
            quantity_flash: TextFlash::default(),
        };
        session.rebuild_view(catalog);
        info!(
            "opened {} menu: {} {} on display",
            match mode {
                TradeMode::Buy => "buy",
                TradeMode::Sell => "sell",
            },
            session.visible.len(),
            tab.as_str(),
        );
        session
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn tab(&self) -> CatalogTab {
        self.tab
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn selected_pos(&self) -> usize {
        self.selected
    }

    /// Catalog index of the selected entry, if the view is non-empty.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    pub fn tick(&mut self, dt: f32) {
        self.cost_flash.update(dt);
        self.quantity_flash.update(dt);
    }

    fn rebuild_view(&mut self, catalog: &EquipmentCatalog) {
        self.visible = match self.mode {
            TradeMode::Buy => catalog.buyable_indices(self.tab),
            TradeMode::Sell => catalog.owned_indices(self.tab),
        };
        self.selected = 0;
    }

    /// Advance the phase machine on a Confirm press.
    pub fn confirm(&mut self, catalog: &mut EquipmentCatalog, fx: &mut Effects) {
        match self.phase {
            DialoguePhase::PurchaseSuccess
            | DialoguePhase::InsufficientFunds
            | DialoguePhase::RestrictedItem
            | DialoguePhase::InventoryLimit => {
                self.phase = DialoguePhase::Idle;
            }
            DialoguePhase::SellSuccess => self.dismiss_sell_success(catalog),
            DialoguePhase::Idle => {
                let Some(index) = self.selected_index() else {
                    return;
                };
                let Some(item) = catalog.item(self.tab, index) else {
                    return;
                };
                if item.is_restricted() {
                    debug!("refused restricted item {}", item.name);
                    self.phase = DialoguePhase::RestrictedItem;
                    fx.shake_camera();
                } else {
                    self.phase = DialoguePhase::Confirming;
                }
            }
            DialoguePhase::Confirming => self.settle(catalog, fx),
        }
    }

    /// Second Confirm: run the actual transaction.
    fn settle(&mut self, catalog: &mut EquipmentCatalog, fx: &mut Effects) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.mode {
            TradeMode::Buy => {
                let at_cap = catalog
                    .item(self.tab, index)
                    .is_some_and(|item| item.owned >= OWNED_CAP);
                if at_cap {
                    self.phase = DialoguePhase::InventoryLimit;
                    fx.shake_camera();
                    self.quantity_flash.start(QUANTITY_FLASH_COUNT, QUANTITY_FLASH_INTERVAL);
                } else if catalog.purchase(self.tab, index) {
                    self.phase = DialoguePhase::PurchaseSuccess;
                } else {
                    self.phase = DialoguePhase::InsufficientFunds;
                    fx.shake_camera();
                    self.cost_flash.start(COST_FLASH_COUNT, COST_FLASH_INTERVAL);
                }
            }
            TradeMode::Sell => {
                if catalog.sell(self.tab, index) {
                    self.phase = DialoguePhase::SellSuccess;
                }
                // A failed sell leaves the confirmation up; the filters make
                // it unreachable in practice.
            }
        }
    }

    /// Leave the sell-success notification. A sold-out item drops off the
    /// view and the selection clamps to the new end.
    fn dismiss_sell_success(&mut self, catalog: &EquipmentCatalog) {
        self.phase = DialoguePhase::Idle;
        if self.mode != TradeMode::Sell {
            return;
        }
        let sold_out = self
            .selected_index()
            .and_then(|index| catalog.item(self.tab, index))
            .is_some_and(|item| item.owned == 0);
        if sold_out {
            self.visible.remove(self.selected);
            if self.selected >= self.visible.len() && !self.visible.is_empty() {
                self.selected = self.visible.len() - 1;
            }
        }
    }

    /// Cancel unwinds one step at a time and is suppressed entirely while an
    /// error notification forces acknowledgement.
    pub fn cancel(&mut self, catalog: &EquipmentCatalog) -> CancelOutcome {
        match self.phase {
            DialoguePhase::PurchaseSuccess => {
                self.phase = DialoguePhase::Idle;
                CancelOutcome::Consumed
            }
            DialoguePhase::SellSuccess => {
                self.dismiss_sell_success(catalog);
                CancelOutcome::Consumed
            }
            DialoguePhase::InsufficientFunds
            | DialoguePhase::RestrictedItem
            | DialoguePhase::InventoryLimit => CancelOutcome::Consumed,
            DialoguePhase::Confirming => {
                self.phase = DialoguePhase::Idle;
                CancelOutcome::Consumed
            }
            DialoguePhase::Idle => CancelOutcome::Exit,
        }
    }

    /// Wheel rotation: the right key walks the view backwards, the left key
    /// forwards, both wrapping.
    pub fn navigate_right(&mut self) {
        if self.phase != DialoguePhase::Idle || self.visible.is_empty() {
            return;
        }
        let len = self.visible.len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn navigate_left(&mut self) {
        if self.phase != DialoguePhase::Idle || self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.visible.len();
    }

    /// Direct selection from a pointer click; same guard as navigation.
    pub fn select(&mut self, view_pos: usize) {
        if self.phase == DialoguePhase::Idle && view_pos < self.visible.len() {
            self.selected = view_pos;
        }
    }

    pub fn switch_tab(&mut self, to: CatalogTab, catalog: &EquipmentCatalog) {
        if self.phase != DialoguePhase::Idle || self.tab == to {
            return;
        }
        self.tab = to;
        self.rebuild_view(catalog);
        debug!("switched to {} tab", to.as_str());
    }

    /// The cancel affordance greys out while an error phase is showing.
    pub fn cancel_enabled(&self) -> bool {
        !matches!(
            self.phase,
            DialoguePhase::InsufficientFunds
                | DialoguePhase::RestrictedItem
                | DialoguePhase::InventoryLimit
        )
    }

    /// Shopkeeper line for the dialogue box.
    pub fn message(&self, catalog: &EquipmentCatalog) -> String {
        match self.phase {
            DialoguePhase::Idle => {
                if self.visible.is_empty() && self.mode == TradeMode::Sell {
                    return match self.tab {
                        CatalogTab::Equipment => "You have no equipments to sell!",
                        CatalogTab::Items => "You have no items to sell!",
                    }
                    .to_string();
                }
                self.idle_prompt().to_string()
            }
            DialoguePhase::Confirming => {
                let Some(item) =
                    self.selected_index().and_then(|index| catalog.item(self.tab, index))
                else {
                    return self.idle_prompt().to_string();
                };
                match self.mode {
                    TradeMode::Buy => format!("It's {} GP,\nOkay?", item.cost),
                    TradeMode::Sell => {
                        format!("I'll pay {} GP\nfor it. Deal?", item.sell_price())
                    }
                }
            }
            DialoguePhase::PurchaseSuccess | DialoguePhase::SellSuccess => {
                "Thank you!".to_string()
            }
            DialoguePhase::InsufficientFunds => "You don't have\nenough GP!".to_string(),
            DialoguePhase::RestrictedItem => "Oops! This is a\nrestricted Item!".to_string(),
            DialoguePhase::InventoryLimit => "You can't carry\nany more!".to_string(),
        }
    }

    fn idle_prompt(&self) -> &'static str {
        match self.mode {
            TradeMode::Buy => "What'll you be\nbuying?",
            TradeMode::Sell => "What'll you be\nselling?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::{CharacterFlags, ShopItem};

    fn item(name: &str, cost: u32, owned: u16) -> ShopItem {
        ShopItem {
            name: name.to_string(),
            cost,
            owned,
            usable_by: CharacterFlags::all(),
            effect: None,
        }
    }

    fn catalog(gold: i64) -> EquipmentCatalog {
        EquipmentCatalog::new(
            vec![
                item("Tiger Suit", 6375, 0),
                item("Wristband", 45, 1),
                item("Rabite Cap", 45, 999),
            ],
            vec![item("Candy", 10, 3), item("Flammie Drum", 0, 1)],
            gold,
        )
    }

    fn buy_session(cat: &EquipmentCatalog) -> ShopSession {
        ShopSession::new(TradeMode::Buy, CatalogTab::Equipment, cat)
    }

    #[test]
    fn test_first_confirm_prompts_without_charging() {
        let mut cat = catalog(1000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::Confirming);
        assert_eq!(session.message(&cat), "It's 6375 GP,\nOkay?");
        assert_eq!(cat.gold(), 1000);
    }

    #[test]
    fn test_second_confirm_buys_and_thanks() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::PurchaseSuccess);
        assert_eq!(session.message(&cat), "Thank you!");
        assert_eq!(cat.gold(), 3625);
        assert_eq!(cat.item(CatalogTab::Equipment, 0).unwrap().owned, 1);
    }

    #[test]
    fn test_insufficient_funds_flow() {
        let mut cat = catalog(3625);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::InsufficientFunds);
        assert_eq!(session.message(&cat), "You don't have\nenough GP!");
        assert_eq!(cat.gold(), 3625);
        assert!(fx.shake.active());
        assert!(session.cost_flash.active());
        assert!(!session.cancel_enabled());

        // Cancel is suppressed; Confirm dismisses back to idle
        assert_eq!(session.cancel(&cat), CancelOutcome::Consumed);
        assert_eq!(session.phase(), DialoguePhase::InsufficientFunds);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert!(session.cancel_enabled());
    }

    #[test]
    fn test_inventory_limit_short_circuits_purchase() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);
        // Select Rabite Cap (view position 2), already at the cap
        session.select(2);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::InventoryLimit);
        assert_eq!(session.message(&cat), "You can't carry\nany more!");
        assert_eq!(cat.gold(), 10000, "the purchase path must not run");
        assert_eq!(cat.item(CatalogTab::Equipment, 2).unwrap().owned, 999);
        assert!(session.quantity_flash.active());
    }

    #[test]
    fn test_restricted_item_skips_confirmation() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = ShopSession::new(TradeMode::Sell, CatalogTab::Items, &cat);
        // Sell view on items: Candy (owned) then Flammie Drum (restricted)
        session.select(1);

        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::RestrictedItem);
        assert_eq!(session.message(&cat), "Oops! This is a\nrestricted Item!");
        assert!(fx.shake.active());
        assert_eq!(session.cancel(&cat), CancelOutcome::Consumed);
        assert_eq!(session.phase(), DialoguePhase::RestrictedItem);
    }

    #[test]
    fn test_sell_pays_half_and_removes_sold_out_entry() {
        let mut cat = catalog(0);
        let mut fx = Effects::default();
        let mut session = ShopSession::new(TradeMode::Sell, CatalogTab::Equipment, &cat);
        // Only Wristband (owned 1) and Rabite Cap are visible
        assert_eq!(session.visible(), &[1, 2]);

        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.message(&cat), "I'll pay 22 GP\nfor it. Deal?");
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::SellSuccess);
        assert_eq!(cat.gold(), 22);

        // Dismissing drops the sold-out wristband from the view
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert_eq!(session.visible(), &[2]);
        assert_eq!(session.selected_pos(), 0);
    }

    #[test]
    fn test_sell_out_last_entry_shows_empty_message() {
        let mut cat = EquipmentCatalog::new(vec![item("Wristband", 45, 1)], vec![], 0);
        let mut fx = Effects::default();
        let mut session = ShopSession::new(TradeMode::Sell, CatalogTab::Equipment, &cat);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert!(session.visible().is_empty());
        assert_eq!(session.message(&cat), "You have no equipments to sell!");
    }

    #[test]
    fn test_dismiss_then_fresh_confirm_cycle() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::PurchaseSuccess);

        // One Confirm dismisses; the next starts a new confirmation
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::Idle);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.phase(), DialoguePhase::Confirming);
        assert_eq!(cat.gold(), 3625, "dismissal must not buy again");
    }

    #[test]
    fn test_cancel_reverts_confirmation() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.cancel(&cat), CancelOutcome::Consumed);
        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert_eq!(cat.gold(), 10000);

        // With nothing to unwind, cancel exits the menu
        assert_eq!(session.cancel(&cat), CancelOutcome::Exit);
    }

    #[test]
    fn test_cancel_dismisses_sell_success_like_confirm() {
        let mut cat = catalog(0);
        let mut fx = Effects::default();
        let mut session = ShopSession::new(TradeMode::Sell, CatalogTab::Equipment, &cat);

        session.confirm(&mut cat, &mut fx);
        session.confirm(&mut cat, &mut fx);
        assert_eq!(session.cancel(&cat), CancelOutcome::Consumed);
        assert_eq!(session.phase(), DialoguePhase::Idle);
        assert_eq!(session.visible(), &[2], "sold-out entry still drops off");
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let cat = catalog(10000);
        let mut session = buy_session(&cat);
        assert_eq!(session.selected_pos(), 0);

        session.navigate_right();
        assert_eq!(session.selected_pos(), 2);
        session.navigate_left();
        assert_eq!(session.selected_pos(), 0);
        session.navigate_left();
        assert_eq!(session.selected_pos(), 1);
    }

    #[test]
    fn test_navigation_blocked_outside_idle() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);

        session.confirm(&mut cat, &mut fx);
        session.navigate_left();
        assert_eq!(session.selected_pos(), 0);
        session.select(1);
        assert_eq!(session.selected_pos(), 0);
    }

    #[test]
    fn test_tab_switch_rebuilds_and_is_gated() {
        let mut cat = catalog(10000);
        let mut fx = Effects::default();
        let mut session = buy_session(&cat);
        session.navigate_left();

        session.switch_tab(CatalogTab::Items, &cat);
        assert_eq!(session.tab(), CatalogTab::Items);
        assert_eq!(session.visible(), &[0], "only Candy is buyable");
        assert_eq!(session.selected_pos(), 0);

        // Same tab again is a no-op; blocked entirely while confirming
        session.switch_tab(CatalogTab::Items, &cat);
        session.confirm(&mut cat, &mut fx);
        session.switch_tab(CatalogTab::Equipment, &cat);
        assert_eq!(session.tab(), CatalogTab::Items);
    }
}
