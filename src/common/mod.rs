mod axis;
mod parity;

pub use axis::*;
pub use parity::*;
