//! Raw heightfield sources.
//! The pipeline only relies on the `HeightfieldSource` contract: a complete `width` x `height`
//! grid of finite elevations. `DiamondSquare` is the bundled fractal implementation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::grid::Grid;
use crate::rng::RandomSource;

pub trait HeightfieldSource {
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        detail_radius: usize,
        amplitude: f32,
    ) -> Grid<f32>;

    /// Restarts internal randomness from `seed`. Stateless sources ignore it.
    fn reseed(&mut self, _seed: u64) {}
}

impl<F> HeightfieldSource for F
where
    F: FnMut(usize, usize, usize, f32) -> Grid<f32>,
{
    fn generate(
        &mut self,
        width: usize,
        height: usize,
        detail_radius: usize,
        amplitude: f32,
    ) -> Grid<f32> {
        self(width, height, detail_radius, amplitude)
    }
}

/// Midpoint-displacement terrain on a `2^n + 1` lattice cropped to the requested extents.
///
/// `detail_radius` sets the spacing of the randomly seeded coarse lattice (rounded up to a
/// power of two); `amplitude` scales the displacement, which shrinks by `roughness` per level.
pub struct DiamondSquare {
    rng: ChaCha8Rng,
    roughness: f32,
}

impl DiamondSquare {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), roughness: 0.5 }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    fn offset(&mut self, scale: f32) -> f32 {
        (self.rng.unit_f32() - 0.5) * scale
    }
}

impl HeightfieldSource for DiamondSquare {
    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn generate(
        &mut self,
        width: usize,
        height: usize,
        detail_radius: usize,
        amplitude: f32,
    ) -> Grid<f32> {
        let size = lattice_size(width.max(height));
        let mut lattice = vec![0.0_f32; size * size];
        let mut step = detail_radius.max(1).next_power_of_two().min(size - 1);

        for y in (0..size).step_by(step) {
            for x in (0..size).step_by(step) {
                lattice[y * size + x] = self.offset(amplitude);
            }
        }

        let mut scale = amplitude * self.roughness;
        while step > 1 {
            let half = step / 2;

            for y in (0..size - 1).step_by(step) {
                for x in (0..size - 1).step_by(step) {
                    let average = (lattice[y * size + x]
                        + lattice[y * size + x + step]
                        + lattice[(y + step) * size + x]
                        + lattice[(y + step) * size + x + step])
                        / 4.0;
                    lattice[(y + half) * size + x + half] = average + self.offset(scale);
                }
            }

            for y in (0..size).step_by(half) {
                let first_x = if (y / half) % 2 == 0 { half } else { 0 };
                for x in (first_x..size).step_by(step) {
                    let mut sum = 0.0;
                    let mut count = 0.0;
                    if x >= half {
                        sum += lattice[y * size + x - half];
                        count += 1.0;
                    }
                    if x + half < size {
                        sum += lattice[y * size + x + half];
                        count += 1.0;
                    }
                    if y >= half {
                        sum += lattice[(y - half) * size + x];
                        count += 1.0;
                    }
                    if y + half < size {
                        sum += lattice[(y + half) * size + x];
                        count += 1.0;
                    }
                    lattice[y * size + x] = sum / count + self.offset(scale);
                }
            }

            step = half;
            scale *= self.roughness;
        }

        Grid::from_fn(width, height, |x, y| lattice[y * size + x])
    }
}

/// Smallest `2^n + 1` (at least 3) covering `extent` samples.
fn lattice_size(extent: usize) -> usize {
    extent.saturating_sub(1).max(2).next_power_of_two() + 1
}
