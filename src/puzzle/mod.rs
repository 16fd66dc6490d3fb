mod notation;
mod sticker_cube;
mod twist;

pub use notation::*;
pub use sticker_cube::*;
pub use twist::*;
