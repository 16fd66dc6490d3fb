use crate::common::Axis;

/// A 3-D rotation axis lying within the hyperplane fixed by a twist axis.
///
/// Components are in {-1, 0, 1} and preserve cubic symmetry under rotation
/// by multiples of the direction's order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TwistDirection(pub [i8; 3]);

impl std::ops::Neg for TwistDirection {
    type Output = Self;
    fn neg(self) -> Self::Output {
        TwistDirection(self.0.map(|x| -x))
    }
}

impl TwistDirection {
    pub fn l1_norm(&self) -> i8 {
        self.0.iter().map(|x| x.abs()).sum()
    }

    /// The number of applications of the base rotation that preserve cubic
    /// symmetry in a full turn: 4 for face axes, else the L1 norm (2 or 3)
    pub fn order(&self) -> i8 {
        match self.l1_norm() {
            1 => 4,
            norm => norm,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 3]
    }

    /// The 13 directions unique up to negation, in lexicographic order
    pub fn iter_unique() -> impl Iterator<Item = TwistDirection> {
        itertools::iproduct!(-1..=1_i8, -1..=1_i8, -1..=1_i8)
            .map(|(x, y, z)| TwistDirection([x, y, z]))
            .skip(14)
    }
}

/// A rigid rotation of one or both layers along one of the four axes.
///
/// `side` selects the layer: +1 or -1 for a single layer, 0 for both (a
/// whole-puzzle rotation, used only in notation translation). `amount` is
/// normalized into {-1, 1, 2} modulo the direction's order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    pub axis: Axis,
    pub direction: TwistDirection,
    pub side: i8,
    pub amount: i8,
}

impl Twist {
    pub fn new(axis: Axis, direction: TwistDirection, side: i8, amount: i8) -> Twist {
        let amount = if direction.is_zero() {
            0
        } else {
            Self::normalize_amount(amount, direction.order())
        };

        Twist {
            axis,
            direction,
            side,
            amount,
        }
    }

    /// Reduces the twist amount to -1, 0, 1, or 2
    fn normalize_amount(amount: i8, order: i8) -> i8 {
        let amount = amount.rem_euclid(order);
        // if the reverse amount is shorter then use that
        if (amount - order).abs() < amount {
            amount - order
        } else {
            amount
        }
    }

    pub fn order(&self) -> i8 {
        self.direction.order()
    }

    pub fn does_nothing(&self) -> bool {
        self.direction.is_zero() || self.amount.rem_euclid(self.order()) == 0
    }

    /// Returns the 4x4 signed-permutation rotation matrix of this twist,
    /// derived from the Rodrigues exponential of the 3-D rotation in the
    /// hyperplane fixed by `axis`. All entries are in {-1, 0, 1}.
    pub fn rotation_matrix(&self) -> [[i8; 4]; 4] {
        let mut matrix4 = [[0_i8; 4]; 4];

        if self.does_nothing() {
            for (i, row) in matrix4.iter_mut().enumerate() {
                row[i] = 1;
            }
            return matrix4;
        }

        let dir = self.direction.0.map(|x| x as f64);
        let l2_norm = dir.iter().map(|x| x * x).sum::<f64>().sqrt();
        let layer_sign = if self.side < 0 { -1.0 } else { 1.0 };
        let theta = self.amount as f64 * std::f64::consts::TAU / self.order() as f64;

        // unit rotation axis, flipped for the negative layer
        let w = dir.map(|x| x / l2_norm * layer_sign);

        // R = I + sin(t) K + (1 - cos(t)) K^2 where K is the cross-product
        // matrix of w
        let k = [
            [0.0, -w[2], w[1]],
            [w[2], 0.0, -w[0]],
            [-w[1], w[0], 0.0],
        ];
        let mut k2 = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                k2[i][j] = (0..3).map(|l| k[i][l] * k[l][j]).sum();
            }
        }
        let mut matrix3 = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let identity = if i == j { 1.0 } else { 0.0 };
                matrix3[i][j] = identity + theta.sin() * k[i][j] + (1.0 - theta.cos()) * k2[i][j];
            }
        }

        // insert an identity row and column on the twist axis
        let axis = self.axis.as_usize();
        let remaining: Vec<usize> = (0..4).filter(|&i| i != axis).collect();
        for i in 0..3 {
            for j in 0..3 {
                matrix4[remaining[i]][remaining[j]] = matrix3[i][j].round() as i8;
            }
        }
        matrix4[axis][axis] = 1;

        matrix4
    }

    /// Applies this twist's rotation matrix to a 4-vector. Does not account
    /// for `side`.
    pub fn rotate_vector(&self, vector: [i8; 4]) -> [i8; 4] {
        let matrix = self.rotation_matrix();
        let mut result = [0_i8; 4];
        for (i, row) in matrix.iter().enumerate() {
            result[i] = (0..4).map(|j| row[j] * vector[j]).sum();
        }
        result
    }
}

impl std::fmt::Display for Twist {
    /// Writes the twist in piece notation, e.g. `RUF2` or `ur'` for a
    /// whole-puzzle rotation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.does_nothing() {
            return Ok(());
        }

        // names for the axes indexed as [side][axis]
        const AXIS_NAMES: [[char; 4]; 2] = [['L', 'B', 'D', 'O'], ['R', 'F', 'U', 'I']];
        const DIR_AXIS_SIGNS: [i8; 4] = [1, -1, 1, -1];

        let mut direction = self.direction;
        let mut amount = self.amount;

        // flip the rotation axis depending on the relative sign of the twist
        // axis in MC4D's frame
        if DIR_AXIS_SIGNS[self.axis.as_usize()] < 0 {
            direction = -direction;
            amount = Self::normalize_amount(-amount, direction.order());
        }

        let first_row = if self.side < 0 { 0 } else { 1 };
        let mut name = String::new();
        name.push(AXIS_NAMES[first_row][self.axis.as_usize()]);

        // subsequent letters name the rotation axis in the fixed hyperplane
        let mut component = 0;
        for axis in 0..4 {
            if axis == self.axis.as_usize() {
                continue;
            }
            match direction.0[component] {
                1 => name.push(AXIS_NAMES[1][axis]),
                -1 => name.push(AXIS_NAMES[0][axis]),
                _ => (),
            }
            component += 1;
        }

        // whole-puzzle rotations are lowercase
        if self.side == 0 {
            name = name.to_lowercase();
        }

        let modifier = match amount {
            -1 => "",
            2 => "2",
            1 => "'",
            _ => unreachable!(),
        };

        write!(f, "{}{}", name, modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_directions() {
        let directions: Vec<_> = TwistDirection::iter_unique().collect();
        assert_eq!(directions.len(), 13);
        assert_eq!(directions[0], TwistDirection([0, 0, 1]));
        // no direction is the negation of another
        for (i, &a) in directions.iter().enumerate() {
            for &b in &directions[i + 1..] {
                assert_ne!(a, -b);
            }
        }
    }

    #[test]
    fn amount_normalization() {
        let face = TwistDirection([0, 1, 0]);
        assert_eq!(Twist::new(Axis::X, face, 1, 3).amount, -1);
        assert_eq!(Twist::new(Axis::X, face, 1, 2).amount, 2);
        assert_eq!(Twist::new(Axis::X, face, 1, 4).amount, 0);

        let corner = TwistDirection([1, 1, 1]);
        assert_eq!(Twist::new(Axis::X, corner, 1, 2).amount, -1);
    }

    #[test]
    fn rotation_matrix_is_signed_permutation() {
        for direction in TwistDirection::iter_unique() {
            for amount in 1..direction.order() {
                let twist = Twist::new(Axis::W, direction, 1, amount);
                let matrix = twist.rotation_matrix();
                for row in matrix {
                    assert_eq!(row.iter().map(|x| x.abs()).sum::<i8>(), 1);
                }
            }
        }
    }

    #[test]
    fn rotation_has_its_order() {
        for direction in TwistDirection::iter_unique() {
            let twist = Twist::new(Axis::Z, direction, 1, 1);
            let mut vector = [1, 2, 3, 4];
            for _ in 0..twist.order() {
                vector = twist.rotate_vector(vector);
            }
            assert_eq!(vector, [1, 2, 3, 4]);
        }
    }

    #[test]
    fn inverse_amount_inverts_rotation() {
        for direction in TwistDirection::iter_unique() {
            let twist = Twist::new(Axis::Y, direction, 1, 1);
            let inverse = Twist::new(Axis::Y, direction, 1, -1);
            let vector = [4, 1, 3, 2];
            assert_eq!(inverse.rotate_vector(twist.rotate_vector(vector)), vector);
        }
    }
}
