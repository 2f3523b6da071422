//! Platform abstraction layer
//!
//! Everything between the pure simulation and the host:
//! - `clock`: fixed-rate tick pacing
//! - `frame`: presenting the game state (HUD, renderers)

pub mod clock;
pub mod frame;

pub use clock::{FixedClock, MAX_SUBSTEPS, SIM_DT};
pub use frame::{HudLogger, HudSnapshot, Renderer};
