//! Injected randomness.
//!
//! The engine never owns a random number generator. Every dispatch that may
//! consume entropy receives a `&mut dyn RngOracle`; replaying a game requires
//! the host to supply the same draws in the same order.

use std::collections::VecDeque;

/// Source of dice for one dispatch.
pub trait RngOracle {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Roll a d6 (1-6 inclusive).
    fn roll_d6(&mut self) -> u8 {
        let face = (self.next_f64() * 6.0).floor() as u8;
        face.min(5) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Deterministic for a given
/// seed, which is all the engine needs for replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

impl RngOracle for PcgRng {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    fn roll_d6(&mut self) -> u8 {
        (self.next_u32() % 6) as u8 + 1
    }
}

/// Replays a fixed sequence of d6 faces.
///
/// Used by tests and by hosts that recorded the dice of a past game. Once the
/// script runs dry it keeps returning `fallback`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    fallback: u8,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().map(|face| face.clamp(1, 6)).collect(),
            fallback: 1,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, face: u8) -> Self {
        self.fallback = face.clamp(1, 6);
        self
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RngOracle for ScriptedDice {
    fn next_f64(&mut self) -> f64 {
        let face = self.roll_d6();
        (f64::from(face) - 1.0) / 6.0
    }

    fn roll_d6(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or(self.fallback)
    }
}
