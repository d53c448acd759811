//! Catalog Data Loading
//!
//! Parses the shop's stock from `assets/catalog.toml` into an
//! [`EquipmentCatalog`]. File order is display order, so the data uses
//! array-of-tables rather than keyed tables.

pub mod item_def;

use log::{info, warn};

use crate::game::catalog::{EquipmentCatalog, ShopItem};
use item_def::RawCatalog;

pub const CATALOG_PATH: &str = "assets/catalog.toml";

/// Parse a catalog file's contents.
pub fn parse_catalog(content: &str) -> Result<EquipmentCatalog, String> {
    let raw: RawCatalog =
        toml::from_str(content).map_err(|e| format!("failed to parse catalog: {}", e))?;

    let equipment = resolve(&raw.equipment, "equipment")?;
    let items = resolve(&raw.items, "items")?;

    if raw.gold < 0 {
        return Err(format!("starting gold must not be negative, got {}", raw.gold));
    }

    info!(
        "loaded catalog: {} equipment, {} items, {} GP",
        equipment.len(),
        items.len(),
        raw.gold
    );
    Ok(EquipmentCatalog::new(equipment, items, raw.gold))
}

fn resolve(raws: &[item_def::RawItemDef], section: &str) -> Result<Vec<ShopItem>, String> {
    let mut out: Vec<ShopItem> = Vec::with_capacity(raws.len());
    for raw in raws {
        let item = ShopItem::from_raw(raw).map_err(|e| format!("[[{}]]: {}", section, e))?;
        if out.iter().any(|existing| existing.name == item.name) {
            warn!("duplicate {} entry '{}', keeping both", section, item.name);
        }
        out.push(item);
    }
    Ok(out)
}

/// Load the catalog through macroquad's asset loader (works on native and
/// in the browser).
pub async fn load_catalog() -> Result<EquipmentCatalog, String> {
    let content = macroquad::file::load_string(CATALOG_PATH)
        .await
        .map_err(|e| format!("failed to read {}: {}", CATALOG_PATH, e))?;
    parse_catalog(&content)
}
