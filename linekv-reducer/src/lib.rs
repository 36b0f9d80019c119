//! Line reducer: turns scanner tokens into one [`Record`] per line.

pub mod record;
pub mod records;
pub mod reducer;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod window;

pub use record::Record;
pub use records::{reduce, Records};
pub use reducer::{Reducer, Reduction};
#[cfg(feature = "streaming")]
pub use streaming::{StreamingReducer, TokenConsumer};
pub use window::Window;
