/// Colours and the shuffled face palette
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// An 8-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Darker variant used for back faces.
    ///
    /// RGB is scaled by 0.9, alpha by 1.1 and then capped at 255.
    pub fn darkened(&self) -> Self {
        Self {
            a: (f64::from(self.a) * 1.1).min(255.0) as u8,
            r: (f64::from(self.r) * 0.9) as u8,
            g: (f64::from(self.g) * 0.9) as u8,
            b: (f64::from(self.b) * 0.9) as u8,
        }
    }

    /// Channels as `[r, g, b]` in `0.0..=1.0`.
    pub fn rgb_unit(&self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    pub fn alpha_unit(&self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Translucent face colours. The blue entry appears twice.
pub const FACE_PALETTE: [Color; 17] = [
    Color::argb(96, 244, 67, 54),
    Color::argb(96, 233, 30, 99),
    Color::argb(96, 156, 39, 176),
    Color::argb(96, 103, 58, 183),
    Color::argb(96, 63, 81, 181),
    Color::argb(96, 33, 150, 243),
    Color::argb(96, 33, 150, 243),
    Color::argb(96, 3, 169, 244),
    Color::argb(96, 0, 188, 212),
    Color::argb(96, 0, 150, 136),
    Color::argb(96, 76, 175, 80),
    Color::argb(96, 139, 195, 74),
    Color::argb(96, 205, 220, 57),
    Color::argb(96, 255, 235, 59),
    Color::argb(96, 255, 193, 7),
    Color::argb(96, 255, 152, 0),
    Color::argb(96, 255, 87, 34),
];

/// Endless colour sequence made of freshly shuffled copies of a palette.
///
/// Every block of `palette.len()` consecutive colours is a permutation of the
/// palette, so the first `palette.len()` colours never repeat an entry.
pub struct ShuffledPalette<R: Rng> {
    palette: Vec<Color>,
    block: Vec<Color>,
    rng: R,
}

impl ShuffledPalette<StdRng> {
    /// Palette shuffled by a seeded generator, or by entropy when `seed` is `None`.
    pub fn with_seed(palette: &[Color], seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(palette, rng)
    }
}

impl<R: Rng> ShuffledPalette<R> {
    pub fn new(palette: &[Color], rng: R) -> Self {
        Self {
            palette: palette.to_vec(),
            block: Vec::new(),
            rng,
        }
    }

    /// Drop the rest of the current block so the next colour starts a new shuffle.
    pub fn restart(&mut self) {
        self.block.clear();
    }

    /// Take `n` colours starting from a fresh block.
    pub fn take_colors(&mut self, n: usize) -> Vec<Color> {
        self.restart();
        self.by_ref().take(n).collect()
    }
}

impl<R: Rng> Iterator for ShuffledPalette<R> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.block.is_empty() {
            self.block = self.palette.clone();
            self.block.shuffle(&mut self.rng);
        }
        self.block.pop()
    }
}
