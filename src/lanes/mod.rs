//! Lane model: fixed-capacity FIFO buffers and the pool that owns them.

mod pool;
mod types;

pub use pool::LanePool;
pub use types::{Lane, LaneId, LaneSpec, LineLayout};
