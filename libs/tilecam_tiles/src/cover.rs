//! Viewport covering by triangle scan-conversion.
//!
//! The viewport footprint is split into two triangles which are
//! rasterised row by row onto the tile grid, in the manner of the
//! polymaps layer scanner.
//! See [polymaps](https://github.com/simplegeo/polymaps/blob/master/src/Layer.js#L333-L383).

use indexmap::IndexMap;
use log::trace;
use rustc_hash::FxBuildHasher;
use tilecam_geo::Coordinate;

use crate::TileCoord;

/// Corner components this close to a grid line are moved onto it, so
/// that inversion noise cannot add a row or column of tiles.
const SNAP_EPSILON: f64 = 1e-7;

/// A triangle edge, oriented so that `y0 <= y1`.
#[derive(Debug, Copy, Clone)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    dx: f64,
    dy: f64,
}

impl Edge {
    fn new(a: Coordinate, b: Coordinate) -> Self {
        let (a, b) = if a.row > b.row { (b, a) } else { (a, b) };

        Edge {
            x0: a.column,
            y0: a.row,
            x1: b.column,
            y1: b.row,
            dx: b.column - a.column,
            dy: b.row - a.row,
        }
    }
}

fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        value
    }
}

/// Walks the rows spanned by `short`, bounded on the other side by `long`,
/// reporting each row's `[x_min, x_max)` column range.
fn scan_spans<F>(long: &Edge, short: &Edge, y_min: i64, y_max: i64, scan_line: &mut F)
where
    F: FnMut(i64, i64, i64),
{
    let y0 = y_min.max(short.y0.floor() as i64);
    let y1 = y_max.min(short.y1.ceil() as i64);

    // Decide which edge lies on the right. Edges sharing their top vertex
    // are compared at the short edge's bottom, otherwise at its top.
    let long_is_left = if long.x0 == short.x0 && long.y0 == short.y0 {
        long.x0 + short.dy / long.dy * long.dx < short.x1
    } else {
        long.x1 - short.dy / long.dy * long.dx < short.x0
    };

    let (right, left) = if long_is_left {
        (short, long)
    } else {
        (long, short)
    };

    let right_slope = right.dx / right.dy;
    let left_slope = left.dx / left.dy;

    // Sample at the row's lower boundary on whichever side leans outwards.
    let right_offset = if right.dx > 0.0 { 1.0 } else { 0.0 };
    let left_offset = if left.dx < 0.0 { 1.0 } else { 0.0 };

    for y in y0..y1 {
        let row = y as f64;

        let right_x =
            right_slope * (row + right_offset - right.y0).min(right.dy).max(0.0) + right.x0;
        let left_x = left_slope * (row + left_offset - left.y0).min(left.dy).max(0.0) + left.x0;

        scan_line(left_x.floor() as i64, right_x.ceil() as i64, y);
    }
}

fn scan_triangle<F>(
    a: Coordinate,
    b: Coordinate,
    c: Coordinate,
    y_min: i64,
    y_max: i64,
    scan_line: &mut F,
) where
    F: FnMut(i64, i64, i64),
{
    let mut ab = Edge::new(a, b);
    let mut bc = Edge::new(b, c);
    let mut ca = Edge::new(c, a);

    // Order by vertical extent, so `ca` becomes the edge spanning the
    // triangle's full height.
    if ab.dy > bc.dy {
        std::mem::swap(&mut ab, &mut bc);
    }
    if ab.dy > ca.dy {
        std::mem::swap(&mut ab, &mut ca);
    }
    if bc.dy > ca.dy {
        std::mem::swap(&mut bc, &mut ca);
    }

    // Flat edges contribute no rows.
    if ab.dy != 0.0 {
        scan_spans(&ca, &ab, y_min, y_max, scan_line);
    }
    if bc.dy != 0.0 {
        scan_spans(&ca, &bc, y_min, y_max, scan_line);
    }
}

/// Lists every tile overlapped by the quadrilateral `bounds`.
///
/// `bounds` are fractional tile-space corners at zoom `z`, in order
/// around the quadrilateral. Columns outside `[0, 2^z)` wrap into
/// neighbouring world copies, rows outside it are dropped. Resulting
/// tiles are stamped with `output_z`, which differs from `z` only for
/// overscaled coverage.
pub fn cover(z: u8, bounds: &[Coordinate; 4], output_z: u8) -> Vec<TileCoord> {
    let tiles = 1i64 << z;
    let mut found: IndexMap<u64, TileCoord, FxBuildHasher> = IndexMap::default();

    let corners = bounds.map(|corner| {
        Coordinate::new(snap(corner.column), snap(corner.row), corner.zoom)
    });
    trace!("covering z={z} corners={corners:?}");

    let mut scan_line = |x0: i64, x1: i64, y: i64| {
        if y < 0 || y >= tiles {
            return;
        }

        for x in x0..x1 {
            let coord = TileCoord::new(
                output_z,
                x.rem_euclid(tiles) as u32,
                y as u32,
                x.div_euclid(tiles) as i32,
            );
            found.insert(coord.id(), coord);
        }
    };

    // Split the footprint along its 0-2 diagonal and scan both halves:
    // +---/
    // | / |
    // /---+
    scan_triangle(corners[0], corners[1], corners[2], 0, tiles, &mut scan_line);
    scan_triangle(corners[2], corners[3], corners[0], 0, tiles, &mut scan_line);

    found.into_values().collect()
}
