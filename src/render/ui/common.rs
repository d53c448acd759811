//! Shared palette, metrics, and panel chrome for the menu renderers

use macroquad::prelude::*;

// Message-window blues
pub const DIALOG_BORDER: Color = Color::new(0.85, 0.85, 0.92, 1.0); // rgba(217, 217, 235)
pub const DIALOG_BORDER_DARK: Color = Color::new(0.25, 0.28, 0.45, 1.0); // rgba(64, 71, 115)
pub const DIALOG_BG: Color = Color::new(0.10, 0.12, 0.35, 0.96); // rgba(26, 31, 89)
pub const DIALOG_BG_DARK: Color = Color::new(0.07, 0.08, 0.26, 1.0); // rgba(18, 20, 66)

// Text
pub const TEXT_NORMAL: Color = Color::new(0.95, 0.95, 0.95, 1.0); // rgba(242, 242, 242)
pub const TEXT_DIM: Color = Color::new(0.62, 0.64, 0.75, 1.0); // rgba(158, 163, 191)
pub const TEXT_SELECTED: Color = Color::new(1.0, 0.88, 0.35, 1.0); // rgba(255, 224, 89)
pub const TEXT_GOLD: Color = Color::new(1.0, 0.82, 0.25, 1.0); // rgba(255, 209, 64)
pub const TEXT_WARNING: Color = Color::new(0.95, 0.35, 0.30, 1.0); // rgba(242, 89, 77)

// Item wheel slots
pub const SLOT_BG: Color = Color::new(0.13, 0.15, 0.40, 1.0); // rgba(33, 38, 102)
pub const SLOT_BORDER: Color = Color::new(0.30, 0.33, 0.52, 1.0); // rgba(77, 84, 133)
pub const SLOT_HOVER_BORDER: Color = Color::new(0.62, 0.66, 0.85, 1.0); // rgba(158, 168, 217)
pub const SLOT_SELECTED_BORDER: Color = Color::new(1.0, 0.88, 0.35, 1.0); // rgba(255, 224, 89)

// Placeholder item icons, tinted per tab
pub const ICON_EQUIPMENT: Color = Color::new(0.55, 0.62, 0.80, 1.0); // rgba(140, 158, 204)
pub const ICON_CONSUMABLE: Color = Color::new(0.45, 0.75, 0.45, 1.0); // rgba(115, 191, 115)

// Chrome buttons
pub const BUTTON_BG: Color = Color::new(0.16, 0.19, 0.45, 1.0); // rgba(41, 48, 115)
pub const BUTTON_BG_HOVER: Color = Color::new(0.24, 0.28, 0.58, 1.0); // rgba(61, 71, 148)
pub const BUTTON_BG_DISABLED: Color = Color::new(0.12, 0.13, 0.24, 1.0); // rgba(31, 33, 61)
pub const BUTTON_BORDER: Color = Color::new(0.45, 0.48, 0.68, 1.0); // rgba(115, 122, 173)

// Shop panel metrics
pub const SHOP_PANEL_WIDTH: f32 = 680.0;
pub const SHOP_PANEL_HEIGHT: f32 = 430.0;
pub const PANEL_PADDING: f32 = 16.0;
pub const WHEEL_SLOT_SIZE: f32 = 48.0;
pub const WHEEL_SLOT_SPACING: f32 = 4.0;
pub const TAB_WIDTH: f32 = 130.0;
pub const TAB_HEIGHT: f32 = 28.0;
pub const BUTTON_WIDTH: f32 = 96.0;
pub const BUTTON_HEIGHT: f32 = 34.0;

/// Bordered message-window panel: light border, dark bevel, blue fill
pub fn draw_dialog_panel(x: f32, y: f32, w: f32, h: f32) {
    draw_rectangle(x, y, w, h, DIALOG_BORDER);
    draw_rectangle(x + 2.0, y + 2.0, w - 4.0, h - 4.0, DIALOG_BORDER_DARK);
    draw_rectangle(x + 4.0, y + 4.0, w - 8.0, h - 8.0, DIALOG_BG);
}
