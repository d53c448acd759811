//! Raw catalog definitions as they appear in the TOML data file, plus
//! resolution into runtime [`ShopItem`]s.

use log::warn;
use serde::Deserialize;

use crate::game::catalog::{CharacterFlags, ShopItem, OWNED_CAP};

/// Whole-file shape of `assets/catalog.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalog {
    #[serde(default = "default_gold")]
    pub gold: i64,
    #[serde(default)]
    pub equipment: Vec<RawItemDef>,
    #[serde(default)]
    pub items: Vec<RawItemDef>,
}

fn default_gold() -> i64 {
    10000
}

/// One `[[equipment]]` or `[[items]]` entry. Everything but the name is
/// optional; `cost = 0` (the default) marks a plot item.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDef {
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub owned: u16,
    #[serde(default)]
    pub randi: bool,
    #[serde(default)]
    pub popoi: bool,
    #[serde(default)]
    pub purim: bool,
    #[serde(default)]
    pub effect: Option<String>,
}

impl ShopItem {
    pub fn from_raw(raw: &RawItemDef) -> Result<Self, String> {
        if raw.name.trim().is_empty() {
            return Err("item with empty name".to_string());
        }
        let mut owned = raw.owned;
        if owned > OWNED_CAP {
            warn!("{}: owned quantity {} exceeds cap, clamping", raw.name, owned);
            owned = OWNED_CAP;
        }
        Ok(Self {
            name: raw.name.clone(),
            cost: raw.cost,
            owned,
            usable_by: CharacterFlags {
                randi: raw.randi,
                popoi: raw.popoi,
                purim: raw.purim,
            },
            effect: raw.effect.clone(),
        })
    }
}
