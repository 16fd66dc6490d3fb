//! Reading and writing MC4D log files: a fixed header, four viewing-matrix
//! rows, and whitespace-separated `code,amount,layer` move tokens with the
//! scramble and solution separated by `m|`.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::common::Axis;
use crate::puzzle::{Twist, TwistDirection, TwistParseError};

const LOG_HEADER: &str = "MagicCube4D 3 0 0 {4,3,3} 2";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("not a 2^4 MagicCube4D log file")]
    NotALogFile,
    #[error(transparent)]
    Twist(#[from] TwistParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A move history that can be saved to or loaded from an MC4D log file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Log {
    pub scramble: Vec<Twist>,
    pub solution: Vec<Twist>,
}

impl Log {
    pub fn read(path: impl AsRef<Path>) -> Result<Log, LogError> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), LogError> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }

    /// All recorded twists, scramble first
    pub fn twists(&self) -> impl Iterator<Item = Twist> + '_ {
        self.scramble.iter().chain(self.solution.iter()).copied()
    }

    /// Generates a log scrambled by the given number of random twists, drawn
    /// the way MC4D draws them (so never two consecutive twists on the same
    /// axis)
    pub fn scramble_n_twists(n_twists: usize) -> Log {
        let mut scramble: Vec<Twist> = Vec::with_capacity(n_twists);

        while scramble.len() < n_twists {
            let twist = random_mc4d_twist();
            if let Some(last) = scramble.last() {
                if last.axis == twist.axis {
                    continue;
                }
            }
            scramble.push(twist);
        }

        Log {
            scramble,
            solution: Vec::new(),
        }
    }
}

/// A random twist with the same distribution MC4D uses when scrambling
fn random_mc4d_twist() -> Twist {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut direction = TwistDirection([0; 3]);
    while direction.is_zero() {
        direction = TwistDirection(std::array::from_fn(|_| rng.gen_range(-1..=1)));
    }

    let axis = Axis::try_from(rng.gen_range(0..4_u8)).unwrap();
    let amount = rng.gen_range(0..2) * 2 - 1;

    Twist::new(axis, direction, 1, amount)
}

impl std::fmt::Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use itertools::Itertools;

        writeln!(f, "{}", LOG_HEADER)?;
        writeln!(f, "1.0 0.0 0.0 0.0")?;
        writeln!(f, "0.0 1.0 0.0 0.0")?;
        writeln!(f, "0.0 0.0 1.0 0.0")?;
        writeln!(f, "0.0 0.0 0.0 1.0")?;
        writeln!(f, "*")?;

        let mut body = self
            .scramble
            .iter()
            .map(|twist| twist.to_mc4d_string())
            .join(" ");

        if !self.scramble.is_empty() {
            body += " m| ";
        }

        body += &self
            .solution
            .iter()
            .map(|twist| twist.to_mc4d_string())
            .join(" ");

        write!(f, "{}.", body)
    }
}

impl FromStr for Log {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let first_line = lines.next().ok_or(LogError::NotALogFile)?;
        if !first_line.starts_with("MagicCube4D") || !first_line.contains("{4,3,3} 2") {
            return Err(LogError::NotALogFile);
        }

        // skip the viewing matrix; the body follows the '*' separator line
        let mut lines = lines.skip_while(|line| line.trim() != "*");
        if lines.next().is_none() {
            return Err(LogError::NotALogFile);
        }

        let body = lines.collect::<Vec<_>>().join(" ");
        let body = body.trim().trim_end_matches('.');

        let (scramble_body, solution_body) = match body.split_once("m|") {
            Some((scramble, solution)) => (scramble, solution),
            None => ("", body),
        };

        let parse_twists = |body: &str| -> Result<Vec<Twist>, TwistParseError> {
            body.split_whitespace().map(Twist::from_str).collect()
        };

        Ok(Log {
            scramble: parse_twists(scramble_body)?,
            solution: parse_twists(solution_body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::StickerCube;

    #[test]
    fn display_roundtrip() {
        let log = Log {
            scramble: vec![
                Twist::new(Axis::X, TwistDirection([0, 1, 1]), 1, 1),
                Twist::new(Axis::W, TwistDirection([1, 0, 0]), -1, 2),
            ],
            solution: vec![Twist::new(Axis::Z, TwistDirection([1, 1, 1]), 1, -1)],
        };

        let reparsed: Log = log.to_string().parse().unwrap();

        // double twists split into two tokens on the way out, so compare by
        // action rather than by twist list
        assert_eq!(
            StickerCube::solved().twists(log.twists()),
            StickerCube::solved().twists(reparsed.twists())
        );
        assert_eq!(reparsed.solution.len(), 1);
    }

    #[test]
    fn rejects_foreign_files() {
        assert!(matches!(
            "MagicCube4D 3 0 0 {3,3,3} 3\n*\n.".parse::<Log>(),
            Err(LogError::NotALogFile)
        ));
        assert!(matches!("".parse::<Log>(), Err(LogError::NotALogFile)));
    }

    #[test]
    fn replaying_a_log_round_trips() {
        let log = Log::scramble_n_twists(20);
        assert_eq!(log.scramble.len(), 20);

        let scrambled = StickerCube::solved().twists(log.twists());
        assert!(!scrambled.is_solved());

        // undoing the scramble in reverse order re-solves the cube
        let undone = log
            .scramble
            .iter()
            .rev()
            .fold(scrambled, |cube, twist| {
                cube.twist(Twist::new(twist.axis, twist.direction, twist.side, -twist.amount))
            });
        assert!(undone.is_solved());
    }

    #[test]
    fn empty_scramble_omits_the_separator() {
        let log = Log {
            scramble: Vec::new(),
            solution: vec![Twist::new(Axis::Y, TwistDirection([0, 0, 1]), 1, 1)],
        };

        let rendered = log.to_string();
        assert!(!rendered.contains("m|"));

        let reparsed: Log = rendered.parse().unwrap();
        assert!(reparsed.scramble.is_empty());
        assert_eq!(reparsed.solution.len(), 1);
    }
}
