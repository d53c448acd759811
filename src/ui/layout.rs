use macroquad::prelude::{Rect, Vec2};

/// Identifier for a clickable UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiElementId {
    // Shop chrome
    ConfirmButton,
    CancelButton,
    TabEquipment,
    TabItems,

    // Buy/Sell choice menu (0 = Buy, 1 = Sell)
    ChoiceOption(u8),

    // Item wheel, by view position
    WheelSlot(usize),
}

/// A single interactive UI element with its bounds
pub struct UiElement {
    pub id: UiElementId,
    pub bounds: Rect,
}

/// Layout for all interactive elements in the current frame
#[derive(Default)]
pub struct UiLayout {
    pub elements: Vec<UiElement>,
}

impl UiLayout {
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(24),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn add(&mut self, id: UiElementId, bounds: Rect) {
        self.elements.push(UiElement { id, bounds });
    }

    /// Find element at mouse position (topmost - iterate in reverse)
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&UiElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.bounds.contains(Vec2::new(x, y)))
            .map(|e| &e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut layout = UiLayout::new();
        layout.add(UiElementId::WheelSlot(0), Rect::new(0.0, 0.0, 100.0, 100.0));
        layout.add(UiElementId::ConfirmButton, Rect::new(40.0, 40.0, 20.0, 20.0));

        assert_eq!(layout.hit_test(50.0, 50.0), Some(&UiElementId::ConfirmButton));
        assert_eq!(layout.hit_test(10.0, 10.0), Some(&UiElementId::WheelSlot(0)));
        assert_eq!(layout.hit_test(200.0, 200.0), None);
    }
}
