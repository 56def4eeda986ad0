//! Binary walkability map (spec §4.2) and the walkable-cell lattice used for
//! spawn and respawn selection.

use crate::errors::RaceError;
use crate::geometry::Vec2;
use crate::rng::Mt19937;

/// Default luminance threshold above which a pixel counts as walkable.
pub const DEFAULT_THRESHOLD_BRIGHTNESS: u8 = 150;

/// Alpha above which a pixel counts as walkable regardless of luminance.
const ALPHA_WALKABLE_THRESHOLD: u8 = 128;

/// Spacing (px) of the `walkable_cells` sampling lattice.
const LATTICE_STEP: u32 = 20;
/// Margin (px) kept clear of the raster edge by the sampling lattice.
const LATTICE_MARGIN: u32 = 40;

/// Immutable walkability bitmap, derived once from an RGBA raster.
///
/// A `Track` never changes after construction — [`RaceError::TrackMutationDuringRace`]
/// is the caller's signal that an attempt to rebuild one mid-race was rejected
/// upstream, not something this type enforces itself.
#[derive(Debug, Clone)]
pub struct Track {
    width: u32,
    height: u32,
    walkable: Vec<bool>,
    walkable_cells: Vec<Vec2>,
}

impl Track {
    /// Builds a `Track` from raw RGBA bytes (`4 * width * height` long).
    ///
    /// A pixel is walkable if `(r+g+b)/3 > threshold_brightness` or
    /// `a > 128`.
    pub fn from_rgba(
        width: u32,
        height: u32,
        bytes: &[u8],
        threshold_brightness: u8,
    ) -> Result<Self, RaceError> {
        if width == 0 || height == 0 {
            return Err(RaceError::InvalidTrackDimensions { width, height });
        }

        let expected_len = width as usize * height as usize * 4;
        if bytes.len() < expected_len {
            return Err(RaceError::InvalidTrackDimensions { width, height });
        }

        let mut walkable = vec![false; width as usize * height as usize];
        for (i, px) in bytes.chunks_exact(4).take(walkable.len()).enumerate() {
            let (r, g, b, a) = (px[0] as u32, px[1] as u32, px[2] as u32, px[3]);
            let luminance = (r + g + b) / 3;
            walkable[i] = luminance > threshold_brightness as u32 || a > ALPHA_WALKABLE_THRESHOLD;
        }

        let walkable_cells = sample_walkable_lattice(width, height, &walkable);
        if walkable_cells.is_empty() {
            return Err(RaceError::EmptyWalkableSet);
        }

        Ok(Self {
            width,
            height,
            walkable,
            walkable_cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All cells sampled from the 20px lattice at construction time.
    pub fn walkable_cells(&self) -> &[Vec2] {
        &self.walkable_cells
    }

    /// Bounds-checked point query. Out-of-bounds is always `false`.
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        if x < 0.0 || y < 0.0 {
            return false;
        }
        let (xi, yi) = (x as u32, y as u32);
        if xi >= self.width || yi >= self.height {
            return false;
        }
        self.walkable[(yi * self.width + xi) as usize]
    }

    /// True if the center, or any of the four axis-aligned points at
    /// distance `radius`, is walkable.
    pub fn is_walkable_with_tolerance(&self, pos: Vec2, radius: f32) -> bool {
        if self.is_walkable(pos.x, pos.y) {
            return true;
        }
        let probes = [
            Vec2::new(pos.x + radius, pos.y),
            Vec2::new(pos.x - radius, pos.y),
            Vec2::new(pos.x, pos.y + radius),
            Vec2::new(pos.x, pos.y - radius),
        ];
        probes.iter().any(|p| self.is_walkable(p.x, p.y))
    }

    /// The lattice-sampled walkable cell farthest (Euclidean) from `pos`.
    ///
    /// Used to place the goal token far from the spawn cluster. Panics only
    /// if `walkable_cells` is empty, which construction already forbids.
    pub fn farthest_walkable_from(&self, pos: Vec2) -> Vec2 {
        *self
            .walkable_cells
            .iter()
            .max_by(|a, b| {
                a.distance_sq(pos)
                    .partial_cmp(&b.distance_sq(pos))
                    .expect("distances are always finite")
            })
            .expect("walkable_cells is never empty after construction")
    }

    /// A uniformly random cell from the lattice.
    pub fn random_walkable(&self, rng: &mut Mt19937) -> Vec2 {
        *rng
            .choice(&self.walkable_cells)
            .expect("walkable_cells is never empty after construction")
    }
}

fn sample_walkable_lattice(width: u32, height: u32, walkable: &[bool]) -> Vec<Vec2> {
    let mut cells = Vec::new();
    if width > 2 * LATTICE_MARGIN && height > 2 * LATTICE_MARGIN {
        let mut y = LATTICE_MARGIN;
        while y <= height - LATTICE_MARGIN {
            let mut x = LATTICE_MARGIN;
            while x <= width - LATTICE_MARGIN {
                if walkable[(y * width + x) as usize] {
                    cells.push(Vec2::new(x as f32, y as f32));
                }
                x += LATTICE_STEP;
            }
            y += LATTICE_STEP;
        }
    }

    // Tracks smaller than the margin on a side (test fixtures, mostly) would
    // otherwise report an empty lattice despite having walkable pixels.
    // Fall back to a plain full-bitmap scan so §3's "non-empty for any
    // valid track" invariant holds regardless of raster size.
    if cells.is_empty() {
        cells = scan_every_walkable_pixel(width, height, walkable);
    }
    cells
}

fn scan_every_walkable_pixel(width: u32, height: u32, walkable: &[bool]) -> Vec<Vec2> {
    let mut cells = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if walkable[(y * width + x) as usize] {
                cells.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    cells
}
