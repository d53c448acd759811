//! Shop Catalog
//!
//! Owns the equipment/item lists and the player's gold, and applies
//! purchase/sell arithmetic. Display filtering returns index lists so the
//! UI can drop entries from view without touching the catalog itself.

use log::{debug, info};

/// Hard cap on how many copies of one item the player can carry.
pub const OWNED_CAP: u16 = 999;

/// Which party members can equip an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterFlags {
    pub randi: bool,
    pub popoi: bool,
    pub purim: bool,
}

impl CharacterFlags {
    pub fn all() -> Self {
        Self { randi: true, popoi: true, purim: true }
    }

    /// Display label for the details panel ("All" or a name list).
    pub fn label(&self) -> String {
        if self.randi && self.popoi && self.purim {
            return "All".to_string();
        }
        let mut users = Vec::new();
        if self.randi {
            users.push("Randi");
        }
        if self.popoi {
            users.push("Popoi");
        }
        if self.purim {
            users.push("Purim");
        }
        if users.is_empty() {
            "None".to_string()
        } else {
            users.join(", ")
        }
    }
}

/// One catalog entry. `cost == 0` marks a plot-critical item that can never
/// be bought or sold.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItem {
    pub name: String,
    pub cost: u32,
    pub owned: u16,
    pub usable_by: CharacterFlags,
    /// Consumable effect line for the details panel, if any.
    pub effect: Option<String>,
}

impl ShopItem {
    /// Selling always pays out half the list price, rounded down.
    pub fn sell_price(&self) -> u32 {
        self.cost / 2
    }

    pub fn is_restricted(&self) -> bool {
        self.cost == 0
    }

    pub fn effect_label(&self) -> &str {
        self.effect.as_deref().unwrap_or("No effect")
    }
}

/// The two catalog pages the shop tabs switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTab {
    Equipment,
    Items,
}

impl CatalogTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogTab::Equipment => "equipment",
            CatalogTab::Items => "items",
        }
    }
}

/// Catalog of everything the shopkeeper trades, plus the player's gold.
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    equipment: Vec<ShopItem>,
    items: Vec<ShopItem>,
    gold: i64,
}

impl EquipmentCatalog {
    pub fn new(equipment: Vec<ShopItem>, items: Vec<ShopItem>, gold: i64) -> Self {
        Self { equipment, items, gold }
    }

    pub fn gold(&self) -> i64 {
        self.gold
    }

    pub fn tab(&self, tab: CatalogTab) -> &[ShopItem] {
        match tab {
            CatalogTab::Equipment => &self.equipment,
            CatalogTab::Items => &self.items,
        }
    }

    fn tab_mut(&mut self, tab: CatalogTab) -> &mut Vec<ShopItem> {
        match tab {
            CatalogTab::Equipment => &mut self.equipment,
            CatalogTab::Items => &mut self.items,
        }
    }

    pub fn item(&self, tab: CatalogTab, index: usize) -> Option<&ShopItem> {
        self.tab(tab).get(index)
    }

    /// Buys one copy of the item. Succeeds iff the player can afford it;
    /// gold and quantity change together or not at all. The 999-cap check is
    /// the caller's job, but the increment saturates so the cap holds even
    /// without it.
    pub fn purchase(&mut self, tab: CatalogTab, index: usize) -> bool {
        let gold = self.gold;
        let Some(item) = self.tab_mut(tab).get_mut(index) else {
            return false;
        };
        if gold < item.cost as i64 {
            debug!(
                "not enough gold for {}: need {}, have {}",
                item.name, item.cost, gold
            );
            return false;
        }
        let cost = item.cost;
        item.owned = item.owned.saturating_add(1).min(OWNED_CAP);
        let name = item.name.clone();
        self.gold -= cost as i64;
        info!("purchased {} for {} GP, {} GP remaining", name, cost, self.gold);
        true
    }

    /// Sells one copy for half price. Fails when nothing is owned or when
    /// the item is plot-critical (`cost == 0`); callers pre-filter the
    /// restricted case for messaging, but the catalog refuses it regardless.
    pub fn sell(&mut self, tab: CatalogTab, index: usize) -> bool {
        let Some(item) = self.tab_mut(tab).get_mut(index) else {
            return false;
        };
        if item.is_restricted() || item.owned == 0 {
            return false;
        }
        let price = item.sell_price();
        item.owned -= 1;
        let name = item.name.clone();
        self.gold += price as i64;
        info!("sold {} for {} GP, now have {} GP", name, price, self.gold);
        true
    }

    /// Overwrite gold and owned counts from a saved session. Names the
    /// catalog does not know are ignored; counts clamp to [`OWNED_CAP`].
    pub fn restore(&mut self, gold: i64, owned: &std::collections::BTreeMap<String, u16>) {
        self.gold = gold.max(0);
        for item in self.equipment.iter_mut().chain(self.items.iter_mut()) {
            if let Some(&count) = owned.get(&item.name) {
                item.owned = count.min(OWNED_CAP);
            }
        }
    }

    /// Indices of everything purchasable on a tab (restricted items hidden).
    pub fn buyable_indices(&self, tab: CatalogTab) -> Vec<usize> {
        self.tab(tab)
            .iter()
            .enumerate()
            .filter(|(_, item)| item.cost > 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of everything the sell view lists: owned items, plus
    /// restricted items so the shopkeeper can refuse them in person.
    pub fn owned_indices(&self, tab: CatalogTab) -> Vec<usize> {
        self.tab(tab)
            .iter()
            .enumerate()
            .filter(|(_, item)| item.owned > 0 || item.cost == 0)
            .map(|(i, _)| i)
            .collect()
    }
}
