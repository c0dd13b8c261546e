//! Platform abstraction layer
//!
//! The simulation never talks to a window, canvas, or DOM directly. These are
//! the seams the outside world plugs into:
//! - Input events
//! - Drawing
//! - Menu visibility
//! - Asset readiness

pub mod assets;
pub mod input;
pub mod menu;
pub mod render;

pub use assets::AssetStatus;
pub use input::{Action, InputBuffer};
pub use menu::{MenuDirective, MenuSink};
pub use render::{DrawCommand, DrawKind, Renderer};
