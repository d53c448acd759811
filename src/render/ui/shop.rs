//! Shop panel: tabs, item wheel, detail card, shopkeeper message, buttons

use macroquad::prelude::*;

use crate::game::{CatalogTab, GameState, ShopSession, TradeMode};
use crate::input::InputMethod;
use crate::ui::{UiElementId, UiLayout};
use super::super::Renderer;
use super::common::*;

const DETAIL_WIDTH: f32 = 300.0;
const DETAIL_HEIGHT: f32 = 180.0;

impl Renderer {
    pub(crate) fn render_shop(
        &self,
        state: &GameState,
        session: &ShopSession,
        layout: &mut UiLayout,
    ) {
        let panel_x = ((screen_width() - SHOP_PANEL_WIDTH) / 2.0).floor();
        let panel_y = 60.0;
        draw_dialog_panel(panel_x, panel_y, SHOP_PANEL_WIDTH, SHOP_PANEL_HEIGHT);

        self.render_shop_tabs(
            state,
            session,
            layout,
            panel_x + PANEL_PADDING,
            panel_y + PANEL_PADDING,
        );

        let gold_text = format!("{} GP", state.catalog.gold());
        let gold_w = self.measure_text_sharp(&gold_text, 18.0).width;
        self.draw_text_sharp(
            &gold_text,
            panel_x + SHOP_PANEL_WIDTH - PANEL_PADDING - gold_w,
            panel_y + PANEL_PADDING + 20.0,
            18.0,
            TEXT_GOLD,
        );

        self.render_wheel(state, session, layout, panel_x, panel_y + 60.0);
        self.render_detail_card(state, session, panel_x + PANEL_PADDING, panel_y + 124.0);
        self.render_message_box(
            state,
            session,
            panel_x + PANEL_PADDING + DETAIL_WIDTH + 16.0,
            panel_y + 124.0,
        );

        let hints = match state.input_method {
            InputMethod::Keyboard => "A/D Choose    Q/P Tabs",
            InputMethod::Controller => "Stick Choose    LB/RB Tabs",
        };
        self.draw_text_sharp(hints, panel_x + PANEL_PADDING, panel_y + 352.0, 12.0, TEXT_DIM);

        let (confirm_hint, cancel_hint) = match state.input_method {
            InputMethod::Keyboard => ("L", "K"),
            InputMethod::Controller => ("A", "B"),
        };
        let confirm_label = match session.mode {
            TradeMode::Buy => "Buy",
            TradeMode::Sell => "Sell",
        };
        let button_y = panel_y + SHOP_PANEL_HEIGHT - PANEL_PADDING - BUTTON_HEIGHT;
        let cancel_x = panel_x + SHOP_PANEL_WIDTH - PANEL_PADDING - BUTTON_WIDTH;
        let confirm_x = cancel_x - BUTTON_WIDTH - 12.0;
        self.draw_chrome_button(
            UiElementId::ConfirmButton,
            confirm_label,
            confirm_hint,
            confirm_x,
            button_y,
            true,
            state,
            layout,
        );
        self.draw_chrome_button(
            UiElementId::CancelButton,
            "Back",
            cancel_hint,
            cancel_x,
            button_y,
            session.cancel_enabled(),
            state,
            layout,
        );
    }

    fn render_shop_tabs(
        &self,
        state: &GameState,
        session: &ShopSession,
        layout: &mut UiLayout,
        x: f32,
        y: f32,
    ) {
        let (hint_left, hint_right) = match state.input_method {
            InputMethod::Keyboard => ("Q", "P"),
            InputMethod::Controller => ("LB", "RB"),
        };
        self.draw_shop_tab(
            UiElementId::TabEquipment,
            "Equipment",
            hint_left,
            CatalogTab::Equipment,
            x,
            y,
            state,
            session,
            layout,
        );
        self.draw_shop_tab(
            UiElementId::TabItems,
            "Items",
            hint_right,
            CatalogTab::Items,
            x + TAB_WIDTH + 4.0,
            y,
            state,
            session,
            layout,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_shop_tab(
        &self,
        id: UiElementId,
        label: &str,
        hint: &str,
        tab: CatalogTab,
        x: f32,
        y: f32,
        state: &GameState,
        session: &ShopSession,
        layout: &mut UiLayout,
    ) {
        layout.add(id, Rect::new(x, y, TAB_WIDTH, TAB_HEIGHT));

        let selected = session.tab() == tab;
        let hovered = state.hovered == Some(id);
        let (bg, border) = if selected {
            (BUTTON_BG_HOVER, SLOT_SELECTED_BORDER)
        } else if hovered {
            (BUTTON_BG, SLOT_HOVER_BORDER)
        } else {
            (SLOT_BG, SLOT_BORDER)
        };
        draw_rectangle(x, y, TAB_WIDTH, TAB_HEIGHT, border);
        draw_rectangle(x + 1.0, y + 1.0, TAB_WIDTH - 2.0, TAB_HEIGHT - 2.0, bg);

        let text_color = if selected {
            TEXT_SELECTED
        } else if hovered {
            TEXT_NORMAL
        } else {
            TEXT_DIM
        };
        self.draw_text_sharp(label, x + 10.0, y + 19.0, 16.0, text_color);

        let hint_w = self.measure_text_sharp(hint, 10.0).width;
        self.draw_text_sharp(hint, x + TAB_WIDTH - hint_w - 6.0, y + 18.0, 10.0, TEXT_DIM);
    }

    /// Horizontal strip of item slots. When the stock does not fit, the
    /// window slides to keep the selection near the center.
    fn render_wheel(
        &self,
        state: &GameState,
        session: &ShopSession,
        layout: &mut UiLayout,
        panel_x: f32,
        y: f32,
    ) {
        let visible = session.visible();
        if visible.is_empty() {
            return;
        }

        let stride = WHEEL_SLOT_SIZE + WHEEL_SLOT_SPACING;
        let inner_w = SHOP_PANEL_WIDTH - 2.0 * PANEL_PADDING;
        let max_slots = ((inner_w + WHEEL_SLOT_SPACING) / stride).floor() as usize;
        let count = visible.len();
        let (first, shown) = if count <= max_slots {
            (0, count)
        } else {
            let first = session
                .selected_pos()
                .saturating_sub(max_slots / 2)
                .min(count - max_slots);
            (first, max_slots)
        };

        let strip_w = shown as f32 * stride - WHEEL_SLOT_SPACING;
        let mut x = (panel_x + (SHOP_PANEL_WIDTH - strip_w) / 2.0).floor();
        let icon = match session.tab() {
            CatalogTab::Equipment => ICON_EQUIPMENT,
            CatalogTab::Items => ICON_CONSUMABLE,
        };

        for view_pos in first..first + shown {
            layout.add(
                UiElementId::WheelSlot(view_pos),
                Rect::new(x, y, WHEEL_SLOT_SIZE, WHEEL_SLOT_SIZE),
            );

            let selected = view_pos == session.selected_pos();
            let hovered = state.hovered == Some(UiElementId::WheelSlot(view_pos));
            let border = if selected {
                SLOT_SELECTED_BORDER
            } else if hovered {
                SLOT_HOVER_BORDER
            } else {
                SLOT_BORDER
            };
            draw_rectangle(x, y, WHEEL_SLOT_SIZE, WHEEL_SLOT_SIZE, border);
            draw_rectangle(
                x + 2.0,
                y + 2.0,
                WHEEL_SLOT_SIZE - 4.0,
                WHEEL_SLOT_SIZE - 4.0,
                SLOT_BG,
            );
            draw_rectangle(
                x + 10.0,
                y + 8.0,
                WHEEL_SLOT_SIZE - 20.0,
                WHEEL_SLOT_SIZE - 24.0,
                icon,
            );

            let item = visible
                .get(view_pos)
                .and_then(|&index| state.catalog.item(session.tab(), index));
            if let Some(item) = item {
                if item.owned > 0 {
                    let owned = format!("{}", item.owned);
                    let owned_w = self.measure_text_sharp(&owned, 10.0).width;
                    self.draw_text_sharp(
                        &owned,
                        x + WHEEL_SLOT_SIZE - owned_w - 4.0,
                        y + WHEEL_SLOT_SIZE - 5.0,
                        10.0,
                        TEXT_NORMAL,
                    );
                }
            }

            x += stride;
        }
    }

    fn render_detail_card(&self, state: &GameState, session: &ShopSession, x: f32, y: f32) {
        draw_rectangle(x, y, DETAIL_WIDTH, DETAIL_HEIGHT, SLOT_BORDER);
        draw_rectangle(
            x + 1.0,
            y + 1.0,
            DETAIL_WIDTH - 2.0,
            DETAIL_HEIGHT - 2.0,
            DIALOG_BG_DARK,
        );

        let item = session
            .selected_index()
            .and_then(|index| state.catalog.item(session.tab(), index));
        let Some(item) = item else {
            self.draw_text_sharp("Nothing on offer", x + 12.0, y + 26.0, 16.0, TEXT_DIM);
            return;
        };

        self.draw_text_sharp(&item.name, x + 12.0, y + 26.0, 16.0, TEXT_NORMAL);

        // Restricted goods trade at no price, shown as a dash
        let price_text = if item.is_restricted() {
            "- GP".to_string()
        } else {
            match session.mode {
                TradeMode::Buy => format!("{} GP", item.cost),
                TradeMode::Sell => format!("{} GP", item.sell_price()),
            }
        };
        let unaffordable =
            session.mode == TradeMode::Buy && i64::from(item.cost) > state.catalog.gold();
        let price_color = if unaffordable { TEXT_WARNING } else { TEXT_GOLD };
        if session.cost_flash.visible() {
            self.draw_text_sharp(&price_text, x + 12.0, y + 52.0, 16.0, price_color);
        }

        if session.quantity_flash.visible() {
            let owned_text = format!("Owned: {}", item.owned);
            self.draw_text_sharp(&owned_text, x + 12.0, y + 76.0, 16.0, TEXT_NORMAL);
        }

        match session.tab() {
            CatalogTab::Equipment => {
                self.draw_text_sharp("Usable By:", x + 12.0, y + 108.0, 12.0, TEXT_DIM);
                self.draw_text_sharp(
                    &item.usable_by.label(),
                    x + 12.0,
                    y + 128.0,
                    16.0,
                    TEXT_NORMAL,
                );
            }
            CatalogTab::Items => {
                self.draw_text_sharp("Effect:", x + 12.0, y + 108.0, 12.0, TEXT_DIM);
                self.draw_text_sharp(item.effect_label(), x + 12.0, y + 128.0, 16.0, TEXT_NORMAL);
            }
        }
    }

    fn render_message_box(&self, state: &GameState, session: &ShopSession, x: f32, y: f32) {
        let w = SHOP_PANEL_WIDTH - DETAIL_WIDTH - 16.0 - 2.0 * PANEL_PADDING;
        draw_rectangle(x, y, w, DETAIL_HEIGHT, SLOT_BORDER);
        draw_rectangle(x + 1.0, y + 1.0, w - 2.0, DETAIL_HEIGHT - 2.0, DIALOG_BG_DARK);

        let message = session.message(&state.catalog);
        let mut line_y = y + 34.0;
        for line in message.lines() {
            self.draw_text_sharp(line, x + 14.0, line_y, 18.0, TEXT_NORMAL);
            line_y += 26.0;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_chrome_button(
        &self,
        id: UiElementId,
        label: &str,
        hint: &str,
        x: f32,
        y: f32,
        enabled: bool,
        state: &GameState,
        layout: &mut UiLayout,
    ) {
        layout.add(id, Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT));

        let hovered = state.hovered == Some(id);
        let bg = if !enabled {
            BUTTON_BG_DISABLED
        } else if hovered {
            BUTTON_BG_HOVER
        } else {
            BUTTON_BG
        };
        draw_rectangle(x, y, BUTTON_WIDTH, BUTTON_HEIGHT, BUTTON_BORDER);
        draw_rectangle(x + 2.0, y + 2.0, BUTTON_WIDTH - 4.0, BUTTON_HEIGHT - 4.0, bg);

        let text_color = if enabled { TEXT_NORMAL } else { TEXT_DIM };
        self.draw_text_sharp(label, x + 12.0, y + 22.0, 16.0, text_color);

        let hint_w = self.measure_text_sharp(hint, 12.0).width;
        self.draw_text_sharp(hint, x + BUTTON_WIDTH - hint_w - 8.0, y + 21.0, 12.0, TEXT_DIM);
    }
}
