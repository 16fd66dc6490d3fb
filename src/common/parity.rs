/// Even or odd permutation parity
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn is_even(&self) -> bool {
        matches!(self, Parity::Even)
    }

    pub fn is_odd(&self) -> bool {
        matches!(self, Parity::Odd)
    }
}
