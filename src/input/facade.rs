//! Input Facade
//!
//! Folds keyboard and (optional) gamepad state into six logical button
//! edges and two axes. Edges are computed per device and merged with OR,
//! so a press on either device fires the logical action exactly once.
//!
//! The facade consumes level snapshots rather than polling the OS itself;
//! the platform layer fills in [`DeviceSnapshot`] each frame and tests can
//! feed synthetic ones. No pad backend is wired in this build, so the pad
//! half of the snapshot stays `None` and reads as released/centered.

use macroquad::input::{is_key_down, KeyCode};

use crate::ui::UiElementId;

/// The six logical actions, in the machine's fixed dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Interact,
    TabLeft,
    Cancel,
    NavigateLeft,
    NavigateRight,
    TabRight,
}

/// Which device the player touched last; drives the button-hint labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Keyboard,
    Controller,
}

/// Keyboard levels for the bound keys: L interact, K cancel, Q/P tabs,
/// A/D navigation (doubling as the horizontal axis), W/S vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeySnapshot {
    pub interact: bool,
    pub cancel: bool,
    pub tab_left: bool,
    pub tab_right: bool,
    pub nav_left: bool,
    pub nav_right: bool,
    pub up: bool,
    pub down: bool,
}

/// Gamepad levels: face/shoulder buttons plus the left stick, +y up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadSnapshot {
    pub interact: bool,
    pub cancel: bool,
    pub tab_left: bool,
    pub tab_right: bool,
    pub nav_left: bool,
    pub nav_right: bool,
    pub stick_x: f32,
    pub stick_y: f32,
}

/// Everything the facade reads for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceSnapshot {
    pub keys: KeySnapshot,
    pub pad: Option<PadSnapshot>,
}

impl DeviceSnapshot {
    /// Sample the keyboard through macroquad. The pad side stays empty
    /// until a platform backend provides it.
    pub fn sample() -> Self {
        Self {
            keys: KeySnapshot {
                interact: is_key_down(KeyCode::L),
                cancel: is_key_down(KeyCode::K),
                tab_left: is_key_down(KeyCode::Q),
                tab_right: is_key_down(KeyCode::P),
                nav_left: is_key_down(KeyCode::A),
                nav_right: is_key_down(KeyCode::D),
                up: is_key_down(KeyCode::W),
                down: is_key_down(KeyCode::S),
            },
            pad: None,
        }
    }
}

/// One tick's worth of normalized input.
#[derive(Debug, Clone)]
pub struct InputFrame {
    /// Fired edges in dispatch order.
    pub pressed: Vec<ButtonEdge>,
    /// [-1, 1]; keyboard wins over the stick when any axis key is held.
    pub axis_x: f32,
    /// [-1, 1], +1 is up.
    pub axis_y: f32,
    pub method: InputMethod,
    /// UI element under a mouse click this tick, if any; selection clicks
    /// (wheel slots, choice options) are applied by the game state.
    pub clicked: Option<UiElementId>,
}

#[derive(Debug, Clone, Copy, Default)]
struct EdgeSet {
    interact: bool,
    cancel: bool,
    tab_left: bool,
    tab_right: bool,
    nav_left: bool,
    nav_right: bool,
}

impl EdgeSet {
    fn any(&self) -> bool {
        self.interact
            || self.cancel
            || self.tab_left
            || self.tab_right
            || self.nav_left
            || self.nav_right
    }

    fn merge(self, other: EdgeSet) -> EdgeSet {
        EdgeSet {
            interact: self.interact || other.interact,
            cancel: self.cancel || other.cancel,
            tab_left: self.tab_left || other.tab_left,
            tab_right: self.tab_right || other.tab_right,
            nav_left: self.nav_left || other.nav_left,
            nav_right: self.nav_right || other.nav_right,
        }
    }
}

pub struct InputFacade {
    prev_keys: KeySnapshot,
    prev_pad: PadSnapshot,
    method: InputMethod,
}

impl InputFacade {
    pub fn new() -> Self {
        Self {
            prev_keys: KeySnapshot::default(),
            prev_pad: PadSnapshot::default(),
            method: InputMethod::Keyboard,
        }
    }

    pub fn method(&self) -> InputMethod {
        self.method
    }

    /// Turn this tick's device levels (plus any resolved mouse click) into
    /// logical edges and axes.
    pub fn poll(&mut self, snap: &DeviceSnapshot, clicked: Option<UiElementId>) -> InputFrame {
        let key_edges = key_edges(&self.prev_keys, &snap.keys);
        let pad_now = snap.pad.unwrap_or_default();
        let pad_edges = pad_edges(&self.prev_pad, &pad_now);

        self.detect_method(snap, &key_edges, &pad_edges);

        let edges = key_edges.merge(pad_edges).merge(click_edges(clicked));

        let mut pressed = Vec::new();
        if edges.interact {
            pressed.push(ButtonEdge::Interact);
        }
        if edges.tab_left {
            pressed.push(ButtonEdge::TabLeft);
        }
        if edges.cancel {
            pressed.push(ButtonEdge::Cancel);
        }
        if edges.nav_left {
            pressed.push(ButtonEdge::NavigateLeft);
        }
        if edges.nav_right {
            pressed.push(ButtonEdge::NavigateRight);
        }
        if edges.tab_right {
            pressed.push(ButtonEdge::TabRight);
        }

        let frame = InputFrame {
            pressed,
            axis_x: merge_axis(snap.keys.nav_left, snap.keys.nav_right, pad_now.stick_x),
            axis_y: merge_axis(snap.keys.down, snap.keys.up, pad_now.stick_y),
            method: self.method,
            clicked,
        };

        self.prev_keys = snap.keys;
        self.prev_pad = pad_now;
        frame
    }

    fn detect_method(&mut self, snap: &DeviceSnapshot, keys: &EdgeSet, pad: &EdgeSet) {
        if let Some(stick) = snap.pad {
            if pad.any() || stick.stick_x.abs() > 0.5 || stick.stick_y.abs() > 0.5 {
                self.method = InputMethod::Controller;
                return;
            }
        }
        let vertical_edge = (snap.keys.up && !self.prev_keys.up)
            || (snap.keys.down && !self.prev_keys.down);
        if keys.any() || vertical_edge {
            self.method = InputMethod::Keyboard;
        }
    }
}

impl Default for InputFacade {
    fn default() -> Self {
        Self::new()
    }
}

fn key_edges(prev: &KeySnapshot, now: &KeySnapshot) -> EdgeSet {
    EdgeSet {
        interact: now.interact && !prev.interact,
        cancel: now.cancel && !prev.cancel,
        tab_left: now.tab_left && !prev.tab_left,
        tab_right: now.tab_right && !prev.tab_right,
        nav_left: now.nav_left && !prev.nav_left,
        nav_right: now.nav_right && !prev.nav_right,
    }
}

fn pad_edges(prev: &PadSnapshot, now: &PadSnapshot) -> EdgeSet {
    EdgeSet {
        interact: now.interact && !prev.interact,
        cancel: now.cancel && !prev.cancel,
        tab_left: now.tab_left && !prev.tab_left,
        tab_right: now.tab_right && !prev.tab_right,
        nav_left: now.nav_left && !prev.nav_left,
        nav_right: now.nav_right && !prev.nav_right,
    }
}

/// Buttons that behave exactly like a key press when clicked. Clicking a
/// choice option also confirms it; the game applies the selection part
/// before the edge lands.
fn click_edges(clicked: Option<UiElementId>) -> EdgeSet {
    let mut edges = EdgeSet::default();
    match clicked {
        Some(UiElementId::ConfirmButton) | Some(UiElementId::ChoiceOption(_)) => {
            edges.interact = true
        }
        Some(UiElementId::CancelButton) => edges.cancel = true,
        Some(UiElementId::TabEquipment) => edges.tab_left = true,
        Some(UiElementId::TabItems) => edges.tab_right = true,
        _ => {}
    }
    edges
}

/// Keyboard keys override the stick; otherwise the raw stick value passes
/// through.
fn merge_axis(negative: bool, positive: bool, stick: f32) -> f32 {
    if negative || positive {
        let mut value = 0.0;
        if negative {
            value -= 1.0;
        }
        if positive {
            value += 1.0;
        }
        value
    } else {
        stick
    }
}
