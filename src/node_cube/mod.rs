mod node;

pub use node::*;
