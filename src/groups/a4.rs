use num_enum::TryFromPrimitive;
use once_cell::sync::Lazy;

use super::*;

/// Elements of the alternating group A4, the orientation group of a single
/// 2^4 corner piece.
///
/// The discriminant encodes the K4 coset in its upper part and the C3 coset
/// in its lower part: `a4 = 3 * k4 + c3`.
///
/// See http://escarbille.free.fr/group/?g=12_3a
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumIter,
    num_enum::TryFromPrimitive,
)]
#[repr(u8)]
pub enum A4 {
    #[default]
    E = 0,
    R1 = 1,
    R2 = 2,
    U1 = 3,
    R8 = 4,
    R6 = 5,
    U2 = 6,
    R5 = 7,
    R3 = 8,
    U3 = 9,
    R4 = 10,
    R7 = 11,
}

impl From<A4> for Permutation<4> {
    fn from(value: A4) -> Self {
        use A4::*;
        Permutation::from_array_unchecked(match value {
            E => [0, 1, 2, 3],
            U1 => [1, 0, 3, 2],
            U2 => [3, 2, 1, 0],
            U3 => [2, 3, 0, 1],
            R6 => [0, 2, 3, 1],
            R3 => [3, 1, 0, 2],
            R2 => [2, 0, 1, 3],
            R7 => [1, 3, 2, 0],
            R5 => [3, 0, 2, 1],
            R1 => [1, 2, 0, 3],
            R8 => [2, 1, 3, 0],
            R4 => [0, 3, 1, 2],
        })
    }
}

impl TryFrom<Permutation<4>> for A4 {
    type Error = String;
    fn try_from(value: Permutation<4>) -> Result<Self, Self::Error> {
        use A4::*;
        match value.into_inner() {
            [0, 1, 2, 3] => Ok(E),
            [1, 0, 3, 2] => Ok(U1),
            [3, 2, 1, 0] => Ok(U2),
            [2, 3, 0, 1] => Ok(U3),
            [0, 2, 3, 1] => Ok(R6),
            [3, 1, 0, 2] => Ok(R3),
            [2, 0, 1, 3] => Ok(R2),
            [1, 3, 2, 0] => Ok(R7),
            [3, 0, 2, 1] => Ok(R5),
            [1, 2, 0, 3] => Ok(R1),
            [2, 1, 3, 0] => Ok(R8),
            [0, 3, 1, 2] => Ok(R4),
            _ => Err(format!("{} is not an A4 group element", value)),
        }
    }
}

// Indexed as [left][right]
static A4_MUL_TABLE: Lazy<Box<[[A4; 12]; 12]>> = Lazy::new(|| {
    use itertools::Itertools;
    use strum::IntoEnumIterator;
    let mut result = Box::new([[A4::E; 12]; 12]);

    for (elem1, elem2) in A4::iter().cartesian_product(A4::iter()) {
        let result_elem =
            A4::try_from(Permutation::from(elem1) * Permutation::from(elem2)).unwrap();

        result[elem1 as usize][elem2 as usize] = result_elem;
    }
    result
});

impl Identity for A4 {
    const IDENTITY: Self = A4::E;
}

impl std::ops::Mul for A4 {
    type Output = A4;
    fn mul(self, rhs: Self) -> Self::Output {
        A4_MUL_TABLE[self as usize][rhs as usize]
    }
}

impl A4 {
    /// Recombines the K4 coset and C3 coset parts into an A4 element
    pub fn from_parts(k4: K4, c3: C3) -> A4 {
        A4::try_from_primitive(3 * k4 as u8 + c3 as u8).unwrap()
    }

    /// Projects onto the K4 coset part
    pub const fn to_k4(self) -> K4 {
        use A4::*;
        match self {
            E | R1 | R2 => K4::E,
            U1 | R8 | R6 => K4::U1,
            U2 | R5 | R3 => K4::U2,
            U3 | R4 | R7 => K4::U3,
        }
    }

    /// Projects onto the C3 coset part
    pub const fn to_c3(self) -> C3 {
        use A4::*;
        match self {
            E | U1 | U2 | U3 => C3::E,
            R1 | R8 | R5 | R4 => C3::A,
            R2 | R6 | R3 | R7 => C3::AA,
        }
    }

    pub const fn inverse(self) -> Self {
        use A4::*;
        match self {
            E => E,
            R1 => R2,
            R2 => R1,
            U1 => U1,
            R8 => R3,
            R6 => R4,
            U2 => U2,
            R5 => R7,
            R3 => R8,
            U3 => U3,
            R4 => R6,
            R7 => R5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn a4_multiplication() {
        assert_eq!(A4::U1 * A4::U2, A4::U3);
        assert_eq!(A4::R6 * A4::R6, A4::R4);
        assert_eq!(A4::U1 * A4::R4, A4::R5);
        assert_eq!(A4::R2 * A4::R5, A4::U3);
        assert_eq!(A4::U3 * A4::R3, A4::R6);
        assert_eq!(A4::E * A4::R8, A4::R8);
    }

    #[test]
    fn a4_inverses() {
        for elem in A4::iter() {
            assert_eq!(elem * elem.inverse(), A4::E);
            assert_eq!(elem.inverse() * elem, A4::E);
        }
    }

    #[test]
    fn a4_associativity() {
        for a in A4::iter() {
            for b in A4::iter() {
                for c in A4::iter() {
                    assert_eq!((a * b) * c, a * (b * c));
                }
            }
        }
    }

    #[test]
    fn a4_parts_roundtrip() {
        for elem in A4::iter() {
            assert_eq!(A4::from_parts(elem.to_k4(), elem.to_c3()), elem);
        }
    }

    #[test]
    fn c3_projection_is_a_homomorphism() {
        for a in A4::iter() {
            for b in A4::iter() {
                assert_eq!((a * b).to_c3(), a.to_c3() * b.to_c3());
            }
        }
    }
}
