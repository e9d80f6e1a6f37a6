//! Seeded pseudo-random stream for the sketchy geometry.
//!
//! A Lehmer-style LCG (multiplier 16807 modulo the Mersenne prime 2^31-1)
//! seeded with a fixed constant. The renderer resets the stream at the start
//! of every render, which is what makes output byte-identical across runs:
//! the sequence of draws is part of the output contract, so draw order in
//! the renderers must not be reshuffled casually.

const SEED: u64 = 42;
const MULTIPLIER: u64 = 16807;
const MODULUS: u64 = 2147483647;

#[derive(Debug, Clone)]
pub struct SketchRng {
    state: u64,
}

impl Default for SketchRng {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchRng {
    pub fn new() -> Self {
        Self { state: SEED }
    }

    pub fn reset(&mut self) {
        self.state = SEED;
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// `v` perturbed by up to `±amount`. One draw.
    pub fn jitter(&mut self, v: f64, amount: f64) -> f64 {
        v + (self.next_f64() - 0.5) * 2.0 * amount
    }

    /// Jitters a point, drawing x first and then y.
    pub fn jitter_point(&mut self, x: f64, y: f64, amount: f64) -> (f64, f64) {
        let jx = self.jitter(x, amount);
        let jy = self.jitter(y, amount);
        (jx, jy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_matches_the_lcg_closed_form() {
        let mut rng = SketchRng::new();
        // 42 * 16807 = 705894; 705894 * 16807 mod (2^31-1) = 1126542223.
        assert_eq!(rng.next_f64(), 705893.0 / 2147483646.0);
        assert_eq!(rng.next_f64(), 1126542222.0 / 2147483646.0);
    }

    #[test]
    fn reset_restores_the_stream() {
        let mut rng = SketchRng::new();
        let first = rng.next_f64();
        rng.next_f64();
        rng.reset();
        assert_eq!(rng.next_f64(), first);
    }

    #[test]
    fn values_stay_in_the_half_open_unit_interval() {
        let mut rng = SketchRng::new();
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn jitter_point_consumes_exactly_two_draws() {
        let mut a = SketchRng::new();
        let mut b = SketchRng::new();
        a.jitter_point(10.0, 20.0, 2.0);
        b.next_f64();
        b.next_f64();
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn jitter_stays_within_the_amount() {
        let mut rng = SketchRng::new();
        for _ in 0..100 {
            let v = rng.jitter(50.0, 2.0);
            assert!((48.0..=52.0).contains(&v));
        }
    }
}
