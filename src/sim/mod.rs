pub mod engine;
pub mod state;

pub use engine::{place_food, tick, TickResult};
pub use state::{Direction, GameState, Phase, Position, StateError};
