//! Adaptive supersampling over a deterministic sample lattice.
//!
//! Instead of shading every lattice point, the sampler shades the four
//! corners of a region and recurses into quadrants only where the corners
//! disagree. Shaded colors are memoized per call, so a point shared by
//! several quadrants is evaluated once. Smooth regions collapse to four
//! evaluations; only edges pay for the full lattice.

use glint_core::Color;
use glint_math::Point3;

/// Checks that an `n` x `n` lattice can be recursively quartered down to
/// 2 x 2 regions: `n` must be 1, 2, or a power of two plus one.
pub fn valid_sample_count(samples: u32) -> bool {
    samples == 1 || samples == 2 || (samples > 2 && (samples - 1).is_power_of_two())
}

/// Averages `eval` over an `n` x `n` row-major lattice of `points`,
/// subdividing only where region corners disagree.
///
/// `points` must hold exactly `samples * samples` entries and satisfy
/// [`valid_sample_count`]. Each lattice point is evaluated at most once.
pub fn adaptive_average(
    points: &[Point3],
    samples: usize,
    eval: &mut dyn FnMut(Point3) -> Color,
) -> Color {
    debug_assert_eq!(points.len(), samples * samples);
    let mut cache = vec![None; points.len()];
    region(points, &mut cache, samples, samples, 0, 0, eval)
}

/// Shades one square region whose top-left lattice coordinate is
/// (`row`, `col`) and whose side spans `len` lattice points.
fn region(
    points: &[Point3],
    cache: &mut [Option<Color>],
    samples: usize,
    len: usize,
    row: usize,
    col: usize,
    eval: &mut dyn FnMut(Point3) -> Color,
) -> Color {
    let corners = [
        (row, col),
        (row, col + len - 1),
        (row + len - 1, col),
        (row + len - 1, col + len - 1),
    ];
    let mut colors = [Color::ZERO; 4];
    for (slot, &(r, c)) in colors.iter_mut().zip(&corners) {
        let index = r * samples + c;
        *slot = match cache[index] {
            Some(color) => color,
            None => {
                let color = eval(points[index]);
                cache[index] = Some(color);
                color
            }
        };
    }

    if colors.iter().all(|&color| color == colors[0]) {
        return colors[0];
    }
    if len > 2 {
        let half = len / 2;
        let child = half + 1;
        (region(points, cache, samples, child, row, col, eval)
            + region(points, cache, samples, child, row, col + half, eval)
            + region(points, cache, samples, child, row + half, col, eval)
            + region(points, cache, samples, child, row + half, col + half, eval))
            / 4.0
    } else {
        (colors[0] + colors[1] + colors[2] + colors[3]) / 4.0
    }
}
