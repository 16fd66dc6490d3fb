use std::str::FromStr;

use num_enum::TryFromPrimitive;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::common::Axis;

use super::{Twist, TwistDirection};

/// Number of twist codes MC4D defines for the 2^4 puzzle (8 faces times 27
/// sticker offsets)
pub const N_MC4D_TWIST_CODES: usize = 216;

/// Errors for parsing the MC4D `code,amount,layer` twist format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TwistParseError {
    #[error("missing twist code")]
    MissingTwistCode,
    #[error("invalid twist code: {0}")]
    InvalidTwistCode(String),
    #[error("missing twist amount")]
    MissingTwistAmount,
    #[error("invalid twist amount: {0}")]
    InvalidTwistAmount(String),
    #[error("missing twist layer mask")]
    MissingLayerMask,
    #[error("invalid twist layer mask: {0}")]
    InvalidLayerMask(String),
    #[error("unexpected trailing value: ,{0}")]
    UnexpectedValue(String),
}

/// The layer mask grabbed when twisting
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Layer {
    This = 1,
    Other = 2,
    Both = 3,
}

/// Relative signs of this program's axes with respect to MC4D's
const DIR_AXIS_SIGNS: [i8; 4] = [1, -1, 1, -1];

/// The (axis, direction, side) triple for each MC4D twist code, in the order
/// MC4D defines them: for each of the 8 faces, the 27 sticker offsets of the
/// face grouped as corners, then edges, then centers, then the core.
static MC4D_TWIST_PARAMETERS: Lazy<[(Axis, TwistDirection, i8); N_MC4D_TWIST_CODES]> =
    Lazy::new(|| {
        // order of axes and sides as defined in MC4D
        const AXIS_ORDER: [usize; 8] = [3, 2, 1, 0, 0, 1, 2, 3];
        const SIDE_ORDER: [i8; 8] = [1, -1, 1, -1, 1, -1, 1, -1];

        let mut parameters = Vec::with_capacity(N_MC4D_TWIST_CODES);

        for face in 0..8 {
            let axis = AXIS_ORDER[face];
            let remaining: Vec<usize> = (0..4).filter(|&a| a != axis).collect();

            // group the sticker offsets by piece type (corner, edge, center,
            // core)
            let mut groups: [Vec<TwistDirection>; 4] = Default::default();

            for (x, y, z) in itertools::iproduct!(-1..=1_i8, -1..=1_i8, -1..=1_i8) {
                // reverse the coordinate and adjust the signs into this
                // program's frame
                let raw = [z, y, x];
                let mut direction = [0_i8; 3];
                for k in 0..3 {
                    direction[k] = raw[k] * DIR_AXIS_SIGNS[remaining[k]] * DIR_AXIS_SIGNS[axis];
                }

                let direction = TwistDirection(direction);
                groups[3 - direction.l1_norm() as usize].push(direction);
            }

            for group in groups {
                for direction in group {
                    parameters.push((
                        Axis::try_from(axis as u8).unwrap(),
                        direction,
                        SIDE_ORDER[face],
                    ));
                }
            }
        }

        parameters.try_into().unwrap()
    });

impl Twist {
    /// Creates a twist from its MC4D twist code, amount, and layer mask
    pub fn from_mc4d(code: usize, amount: i8, layer: Layer) -> Twist {
        let (axis, mut direction, mut side) = MC4D_TWIST_PARAMETERS[code];

        match layer {
            Layer::This => (),
            // the second layer is the same twist seen from the opposite side
            Layer::Other => {
                side = -side;
                direction = -direction;
            }
            // both layers is a whole-puzzle rotation; canonicalize it to the
            // positive side
            Layer::Both => {
                if side == -1 {
                    direction = -direction;
                }
                side = 0;
            }
        }

        Twist::new(axis, direction, side, amount)
    }

    /// Returns the MC4D parameters `(code, amount, layer)` for this twist.
    /// Double twists are returned as two quarter twists.
    pub fn to_mc4d(&self) -> Vec<(usize, i8, u8)> {
        let side = if self.side < 0 { -1 } else { 1 };
        let code = MC4D_TWIST_PARAMETERS
            .iter()
            .position(|&(axis, direction, s)| {
                axis == self.axis && direction == self.direction && s == side
            })
            .unwrap();

        let layer = if self.side == 0 {
            Layer::Both
        } else {
            Layer::This
        };

        if self.amount == 2 {
            vec![(code, 1, layer as u8); 2]
        } else {
            vec![(code, self.amount, layer as u8)]
        }
    }

    /// Returns this twist as whitespace-separated MC4D `code,amount,layer`
    /// tokens
    pub fn to_mc4d_string(&self) -> String {
        use itertools::Itertools;
        self.to_mc4d()
            .into_iter()
            .map(|(code, amount, layer)| format!("{},{},{}", code, amount, layer))
            .join(" ")
    }
}

impl FromStr for Twist {
    type Err = TwistParseError;

    /// Parses a single MC4D `code,amount,layer` token
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TwistParseError::*;

        let mut segments = s.split(',');

        let code_string = segments.next().ok_or(MissingTwistCode)?.to_owned();
        let code = code_string
            .parse::<usize>()
            .ok()
            .filter(|&code| code < N_MC4D_TWIST_CODES)
            .ok_or(InvalidTwistCode(code_string))?;

        let amount_string = segments.next().ok_or(MissingTwistAmount)?.to_owned();
        let amount = amount_string
            .parse::<i8>()
            .or(Err(InvalidTwistAmount(amount_string)))?;

        let layer_string = segments.next().ok_or(MissingLayerMask)?.to_owned();
        let layer = layer_string
            .parse::<u8>()
            .ok()
            .and_then(|mask| Layer::try_from_primitive(mask).ok())
            .ok_or(InvalidLayerMask(layer_string))?;

        if let Some(value) = segments.next() {
            return Err(UnexpectedValue(value.to_owned()));
        }

        Ok(Twist::from_mc4d(code, amount, layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::StickerCube;

    #[test]
    fn mc4d_parameter_count() {
        assert_eq!(MC4D_TWIST_PARAMETERS.len(), 216);
    }

    #[test]
    fn mc4d_roundtrip_action() {
        // every single-layer twist maps to MC4D tokens that reproduce its
        // action on the puzzle
        for direction in TwistDirection::iter_unique() {
            for side in [-1, 1] {
                let twist = Twist::new(Axis::Y, direction, side, 1);

                let direct = StickerCube::solved().twist(twist);
                let mut via_mc4d = StickerCube::solved();
                for token in twist.to_mc4d_string().split_whitespace() {
                    via_mc4d = via_mc4d.twist(token.parse().unwrap());
                }

                assert_eq!(direct, via_mc4d, "{}", twist);
            }
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "500,1,1".parse::<Twist>(),
            Err(TwistParseError::InvalidTwistCode("500".to_owned()))
        );
        assert_eq!(
            "12,1".parse::<Twist>(),
            Err(TwistParseError::MissingLayerMask)
        );
        assert_eq!(
            "12,1,4".parse::<Twist>(),
            Err(TwistParseError::InvalidLayerMask("4".to_owned()))
        );
        assert_eq!(
            "12,1,1,7".parse::<Twist>(),
            Err(TwistParseError::UnexpectedValue("7".to_owned()))
        );
    }
}
