/// An enum representing the axes X, Y, Z, and W
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumIter,
    num_enum::TryFromPrimitive,
)]
#[repr(u8)]
pub enum Axis {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Axis::*;
        let string = match self {
            X => "X",
            Y => "Y",
            Z => "Z",
            W => "W",
        };
        write!(f, "{}", string)
    }
}

impl Axis {
    /// Returns the next axis in cyclic order (W wraps to X)
    pub const fn next(self) -> Axis {
        use Axis::*;
        match self {
            X => Y,
            Y => Z,
            Z => W,
            W => X,
        }
    }

    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_cycle() {
        use strum::IntoEnumIterator;
        for axis in Axis::iter() {
            assert_eq!(axis.next().next().next().next(), axis);
        }
    }

    #[test]
    fn axis_from_int() {
        assert_eq!(Axis::try_from(2_u8).unwrap(), Axis::Z);
        assert!(Axis::try_from(4_u8).is_err());
    }
}
