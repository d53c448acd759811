pub mod facade;

pub use facade::{
    ButtonEdge, DeviceSnapshot, InputFacade, InputFrame, InputMethod, KeySnapshot, PadSnapshot,
};
