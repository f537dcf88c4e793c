//! Randomness source for flower placement.
//!
//! Placement only needs uniform draws in [0, 1); nothing here is crypto secure.

/// Uniform source of f64 values in [0, 1).
pub trait UnitRng {
    fn next_unit(&mut self) -> f64;
}

/// Closures work as sources too, which keeps tests deterministic.
impl<F: FnMut() -> f64> UnitRng for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// xorshift64* generator.
#[derive(Clone, Debug)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn seeded(seed: u64) -> Self {
        // xorshift must never hold an all-zero state
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// Seed from the host. With the `rng` feature this is the browser's crypto
    /// source; otherwise the current clock.
    pub fn from_entropy() -> Self {
        Self::seeded(entropy_seed())
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl UnitRng for Prng {
    fn next_unit(&mut self) -> f64 {
        // top 53 bits -> [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}); falling back to clock seed");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    clock_seed()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    (now * 1000.0) as u64 ^ 0xA076_1D64_78BD_642F
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
