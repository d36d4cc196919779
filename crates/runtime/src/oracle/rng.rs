//! Host-side dice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactics_core::RngOracle;

/// [`RngOracle`] over `rand`'s [`StdRng`].
pub struct StdRngOracle {
    rng: StdRng,
}

impl StdRngOracle {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RngOracle for StdRngOracle {
    fn next_f64(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    fn roll_d6(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Forwards to another oracle and keeps every d6 face it hands out.
///
/// The recorded faces are what a replay feeds back through
/// [`tactics_core::ScriptedDice`].
pub struct RecordingRng<'a> {
    inner: &'a mut dyn RngOracle,
    faces: Vec<u8>,
}

impl<'a> RecordingRng<'a> {
    pub fn new(inner: &'a mut dyn RngOracle) -> Self {
        Self {
            inner,
            faces: Vec::new(),
        }
    }

    pub fn into_faces(self) -> Vec<u8> {
        self.faces
    }
}

impl RngOracle for RecordingRng<'_> {
    fn next_f64(&mut self) -> f64 {
        self.inner.next_f64()
    }

    fn roll_d6(&mut self) -> u8 {
        let face = self.inner.roll_d6();
        self.faces.push(face);
        face
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::ScriptedDice;

    use super::*;

    #[test]
    fn seeded_rolls_repeat() {
        let mut a = StdRngOracle::seeded(9);
        let mut b = StdRngOracle::seeded(9);
        let rolls: Vec<u8> = (0..16).map(|_| a.roll_d6()).collect();
        assert_eq!(rolls, (0..16).map(|_| b.roll_d6()).collect::<Vec<_>>());
        assert!(rolls.iter().all(|face| (1..=6).contains(face)));
    }

    #[test]
    fn recorder_keeps_faces_in_order() {
        let mut dice = ScriptedDice::new([4, 2, 6]);
        let mut recorder = RecordingRng::new(&mut dice);
        recorder.roll_d6();
        recorder.roll_d6();
        assert_eq!(recorder.into_faces(), vec![4, 2]);
        assert_eq!(dice.remaining(), 1);
    }
}
