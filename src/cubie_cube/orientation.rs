use num_enum::TryFromPrimitive;

use crate::groups::{Identity, A4, C3, K4};

use super::Permutation;

/// Number of K4 orientation coordinate states (4^15)
pub const N_K4_COORD_STATES: u32 = 4_u32.pow(15);
/// Number of C3 orientation coordinate states (3^14, the 15th digit is
/// fixed by the zero-sum invariant)
pub const N_C3_COORD_STATES: u32 = 3_u32.pow(14);

/// The orientation of the piece occupying each of the 15 movable slots
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Orientation<T> {
    state: [T; 15],
}

impl<T: Copy + Identity> Orientation<T> {
    pub const fn from_array(state: [T; 15]) -> Self {
        Orientation { state }
    }

    pub fn solved() -> Self {
        Orientation {
            state: [T::IDENTITY; 15],
        }
    }

    pub fn into_inner(self) -> [T; 15] {
        self.state
    }

    /// Moves each slot's orientation to where the permutation sends the slot
    pub fn permute(self, permutation: &Permutation) -> Self {
        let mut result = [T::IDENTITY; 15];
        for (i, entry) in result.iter_mut().enumerate() {
            *entry = self.state[permutation.0[i] as usize];
        }
        Orientation { state: result }
    }
}

impl Orientation<A4> {
    /// Applies the orientation action of a move or another cube state
    pub fn apply_orientation(self, action: &Orientation<A4>) -> Self {
        let mut result = self.state;
        for (i, entry) in result.iter_mut().enumerate() {
            *entry = action.state[i] * *entry;
        }
        Orientation { state: result }
    }

    pub fn k4_coord(&self) -> u32 {
        self.state
            .iter()
            .enumerate()
            .map(|(i, value)| (value.to_k4() as u32) << (2 * i))
            .sum()
    }

    pub fn c3_coord(&self) -> u32 {
        let mut result = 0;
        for i in (0..14).rev() {
            result = result * 3 + self.state[i].to_c3() as u32;
        }
        result
    }

    pub fn to_k4(self) -> Orientation<K4> {
        Orientation {
            state: self.state.map(|value| value.to_k4()),
        }
    }

    pub fn to_c3(self) -> Orientation<C3> {
        Orientation {
            state: self.state.map(|value| value.to_c3()),
        }
    }

    /// Rebuilds the full orientation from its K4 and C3 coordinates
    pub fn from_k4_c3_coords(k4_coord: u32, c3_coord: u32) -> Self {
        let k4 = Orientation::<K4>::from_k4_coord(k4_coord).into_inner();
        let c3 = Orientation::<C3>::from_c3_coord(c3_coord).into_inner();

        Orientation {
            state: std::array::from_fn(|i| A4::from_parts(k4[i], c3[i])),
        }
    }
}

impl Orientation<K4> {
    /// Applies the orientation action of a move, projected onto K4
    pub fn apply_orientation(self, action: &Orientation<A4>) -> Self {
        let mut result = self.state;
        for (i, entry) in result.iter_mut().enumerate() {
            *entry = action.state[i] * *entry;
        }
        Orientation { state: result }
    }

    pub fn k4_coord(&self) -> u32 {
        self.state
            .iter()
            .enumerate()
            .map(|(i, &value)| (value as u32) << (2 * i))
            .sum()
    }

    pub fn from_k4_coord(k4_coord: u32) -> Self {
        debug_assert!(k4_coord < N_K4_COORD_STATES);

        Orientation {
            state: std::array::from_fn(|i| {
                K4::try_from_primitive((k4_coord >> (2 * i) & 3) as u8).unwrap()
            }),
        }
    }
}

impl Orientation<C3> {
    pub fn c3_coord(&self) -> u32 {
        let mut result = 0;
        for i in (0..14).rev() {
            result = result * 3 + self.state[i] as u32;
        }
        result
    }

    pub fn from_c3_coord(c3_coord: u32) -> Self {
        debug_assert!(c3_coord < N_C3_COORD_STATES);

        let mut result = [C3::E; 15];
        let mut coord = c3_coord;
        let mut sum = 0;

        for entry in result.iter_mut().take(14) {
            let digit = coord % 3;
            sum += digit;
            *entry = C3::try_from_primitive(digit as u8).unwrap();
            coord /= 3;
        }

        // the last piece's twist is fixed by the zero-sum invariant
        result[14] = C3::try_from_primitive((-(sum as i32)).rem_euclid(3) as u8).unwrap();

        Orientation { state: result }
    }

    pub fn to_a4(self) -> Orientation<A4> {
        Orientation {
            state: self.state.map(|value| value.to_a4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c3_coord_roundtrip() {
        for coord in (0..N_C3_COORD_STATES).step_by(10_007) {
            assert_eq!(Orientation::<C3>::from_c3_coord(coord).c3_coord(), coord);
        }
    }

    #[test]
    fn c3_digits_sum_to_zero() {
        for coord in (0..N_C3_COORD_STATES).step_by(65_537) {
            let sum: u32 = Orientation::<C3>::from_c3_coord(coord)
                .into_inner()
                .iter()
                .map(|&value| value as u32)
                .sum();
            assert_eq!(sum % 3, 0);
        }
    }

    #[test]
    fn k4_coord_roundtrip() {
        for coord in (0..N_K4_COORD_STATES).step_by(999_983) {
            assert_eq!(Orientation::<K4>::from_k4_coord(coord).k4_coord(), coord);
        }
    }

    #[test]
    fn k4_c3_recombination() {
        let orientation = Orientation::<A4>::from_k4_c3_coords(123_456_789, 987_654);
        assert_eq!(orientation.to_k4().k4_coord(), 123_456_789);
        assert_eq!(orientation.to_c3().c3_coord(), 987_654);
    }
}
