use once_cell::sync::Lazy;

use super::*;

/// Elements of the Klein four-group, the "flip" part of a piece orientation.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, num_enum::TryFromPrimitive,
)]
#[repr(u8)]
pub enum K4 {
    #[default]
    E = 0,
    U1 = 1,
    U2 = 2,
    U3 = 3,
}

impl Identity for K4 {
    const IDENTITY: Self = K4::E;
}

impl std::ops::Mul for K4 {
    type Output = K4;
    fn mul(self, rhs: Self) -> Self::Output {
        use K4::*;
        match (self, rhs) {
            (E, val) | (val, E) => val,
            (U1, U1) | (U2, U2) | (U3, U3) => E,
            (U1, U2) | (U2, U1) => U3,
            (U1, U3) | (U3, U1) => U2,
            (U2, U3) | (U3, U2) => U1,
        }
    }
}

impl K4 {
    pub const fn to_a4(self) -> A4 {
        match self {
            K4::E => A4::E,
            K4::U1 => A4::U1,
            K4::U2 => A4::U2,
            K4::U3 => A4::U3,
        }
    }
}

// Indexed as [left][right]. The K4 coset of `a * b` depends only on `a` and
// the K4 coset of `b`, which is what makes the phase 1 node well defined.
static A4_K4_MUL_TABLE: Lazy<Box<[[K4; 4]; 12]>> = Lazy::new(|| {
    use itertools::Itertools;
    use strum::IntoEnumIterator;
    let mut result = Box::new([[K4::E; 4]; 12]);

    for (elem1, elem2) in A4::iter().cartesian_product(A4::iter()) {
        let result_elem = (elem1 * elem2).to_k4();

        // make sure that when we overwrite a previously calculated value it
        // is the same
        let existing_value = result[elem1 as usize][elem2.to_k4() as usize];
        assert!(existing_value == result_elem || existing_value == K4::E);

        result[elem1 as usize][elem2.to_k4() as usize] = result_elem;
    }
    result
});

impl std::ops::Mul<K4> for A4 {
    type Output = K4;

    fn mul(self, rhs: K4) -> K4 {
        A4_K4_MUL_TABLE[self as usize][rhs as usize]
    }
}
