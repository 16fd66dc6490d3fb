mod a4;
mod c3;
mod k4;
mod permutation;

pub use a4::*;
pub use c3::*;
pub use k4::*;
pub use permutation::*;

/// A trait for group element types with an identity element
pub trait Identity: PartialEq + Sized {
    /// The identity element
    const IDENTITY: Self;

    /// Returns whether the element is the identity
    fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
