//! Seedable xorshift64 generator for per-shape fill colors.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Integer in `[low, high)`. Returns `low` when the range is empty.
    pub fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + (self.next_u64() % (high - low) as u64) as u32
    }

    /// Channel value in `[low, 256)`.
    pub fn channel(&mut self, low: u8) -> u8 {
        self.range(low as u32, 256) as u8
    }
}
