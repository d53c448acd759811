//! Session persistence.
//!
//! Gold, owned quantities, and the remembered buy/sell option are written
//! to a small TOML file in the user config dir whenever the shop closes.
//! Loading is best effort: a missing or unreadable file just means the
//! catalog keeps its defaults.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::catalog::{CatalogTab, EquipmentCatalog};
use crate::game::interaction::BuySellChoice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub gold: i64,
    #[serde(default)]
    pub last_choice: BuySellChoice,
    #[serde(default)]
    pub owned: BTreeMap<String, u16>,
}

impl SaveData {
    /// Snapshot the catalog. Every entry's count is recorded so restoring
    /// can also bring quantities back down below their catalog defaults.
    pub fn capture(catalog: &EquipmentCatalog, last_choice: BuySellChoice) -> Self {
        let mut owned = BTreeMap::new();
        for tab in [CatalogTab::Equipment, CatalogTab::Items] {
            for item in catalog.tab(tab) {
                owned.insert(item.name.clone(), item.owned);
            }
        }
        Self {
            gold: catalog.gold(),
            last_choice,
            owned,
        }
    }

    pub fn apply(&self, catalog: &mut EquipmentCatalog) {
        catalog.restore(self.gold, &self.owned);
    }
}

// Platform-specific persistence

#[cfg(not(target_arch = "wasm32"))]
fn session_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|p| p.join("potos-market").join("session.toml"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_session() -> Option<SaveData> {
    read_session(&session_path()?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_session(data: &SaveData) {
    let Some(path) = session_path() else {
        return;
    };
    if let Err(err) = write_session(&path, data) {
        warn!("failed to save session: {}", err);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_session() -> Option<SaveData> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn save_session(_data: &SaveData) {}

#[cfg(not(target_arch = "wasm32"))]
fn read_session(path: &std::path::Path) -> Option<SaveData> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&contents) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!("ignoring unreadable session file: {}", err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_session(path: &std::path::Path, data: &SaveData) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
    }
    let contents =
        toml::to_string_pretty(data).map_err(|e| format!("failed to encode session: {}", e))?;
    std::fs::write(path, contents).map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::{CharacterFlags, ShopItem};
    use tempfile::tempdir;

    fn item(name: &str, cost: u32, owned: u16) -> ShopItem {
        ShopItem {
            name: name.to_string(),
            cost,
            owned,
            usable_by: CharacterFlags::all(),
            effect: None,
        }
    }

    fn catalog() -> EquipmentCatalog {
        EquipmentCatalog::new(
            vec![item("Sword", 100, 0), item("Cap", 45, 998)],
            vec![item("Herb", 10, 2)],
            500,
        )
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let data = SaveData::capture(&catalog(), BuySellChoice::Sell);
        write_session(&path, &data).unwrap();
        let loaded = read_session(&path).unwrap();
        assert_eq!(loaded, data);
        assert_eq!(loaded.gold, 500);
        assert_eq!(loaded.last_choice, BuySellChoice::Sell);
        assert_eq!(loaded.owned.get("Cap"), Some(&998));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("potos-market").join("session.toml");
        let data = SaveData::capture(&catalog(), BuySellChoice::Buy);
        write_session(&path, &data).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        assert_eq!(read_session(&dir.path().join("nope.toml")), None);
    }

    #[test]
    fn test_garbage_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "gold = \"plenty\"").unwrap();
        assert_eq!(read_session(&path), None);
    }

    #[test]
    fn test_apply_restores_a_fresh_catalog() {
        let mut played = catalog();
        assert!(played.purchase(CatalogTab::Equipment, 0));
        assert!(played.sell(CatalogTab::Items, 0));
        let data = SaveData::capture(&played, BuySellChoice::Buy);

        let mut fresh = catalog();
        data.apply(&mut fresh);
        assert_eq!(fresh.gold(), played.gold());
        assert_eq!(fresh.item(CatalogTab::Equipment, 0).map(|i| i.owned), Some(1));
        assert_eq!(fresh.item(CatalogTab::Items, 0).map(|i| i.owned), Some(1));
    }

    #[test]
    fn test_apply_ignores_unknown_names_and_clamps_counts() {
        let mut data = SaveData::capture(&catalog(), BuySellChoice::Buy);
        data.owned.insert("Ghost Blade".to_string(), 5);
        data.owned.insert("Herb".to_string(), 5000);
        data.gold = -20;

        let mut fresh = catalog();
        data.apply(&mut fresh);
        assert_eq!(fresh.gold(), 0);
        assert_eq!(fresh.item(CatalogTab::Items, 0).map(|i| i.owned), Some(999));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "gold = 42").unwrap();
        let loaded = read_session(&path).unwrap();
        assert_eq!(loaded.gold, 42);
        assert_eq!(loaded.last_choice, BuySellChoice::Buy);
        assert!(loaded.owned.is_empty());
    }
}
