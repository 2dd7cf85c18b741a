#![cfg(test)]

use std::collections::{HashMap, HashSet};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::DVec4;
use itertools::Itertools;
use log::info;
use tilecam_geo::{Coordinate, LngLat, Point};
use tilecam_tiles::TileCoord;

use crate::transform::{
    CoveringOptions, Degeneracy, StateUpdate, Transform, TransformError, TransformState,
    ZoomRounding,
};

fn camera(center: LngLat, zoom: f64, width: f64, height: f64) -> Transform {
    Transform::new(TransformState {
        center,
        zoom,
        width,
        height,
        ..TransformState::default()
    })
    .expect("camera must be valid")
}

fn tilted(pitch: f64, bearing: f64) -> Transform {
    let mut transform = camera(LngLat::new(10.0, 20.0), 5.5, 800.0, 600.0);
    transform
        .update_state(StateUpdate {
            pitch: Some(pitch),
            bearing: Some(bearing),
            ..StateUpdate::default()
        })
        .expect("tilted camera must be valid");
    transform
}

fn addresses(tiles: &[TileCoord]) -> HashSet<(u8, u32, u32, i32)> {
    tiles.iter().map(|t| (t.z(), t.x(), t.y(), t.w())).collect()
}

#[test_log::test]
fn covering_single_tile_at_zoom_zero() {
    let transform = camera(LngLat::new(0.0, 0.0), 0.0, 512.0, 512.0);
    let tiles = transform
        .covering_tiles(&CoveringOptions {
            tile_size: 512.0,
            min_zoom: 0,
            max_zoom: 20,
            ..CoveringOptions::default()
        })
        .expect("covering must succeed");

    assert_eq!(tiles, vec![TileCoord::new(0, 0, 0, 0)]);
}

#[test_log::test]
fn covering_whole_world_at_zoom_one() {
    let transform = camera(LngLat::new(0.0, 0.0), 1.0, 1024.0, 1024.0);
    let tiles = transform
        .covering_tiles(&CoveringOptions::default())
        .expect("covering must succeed");

    assert_eq!(tiles.len(), 4);
    assert_eq!(
        addresses(&tiles),
        HashSet::from([(1, 0, 0, 0), (1, 1, 0, 0), (1, 0, 1, 0), (1, 1, 1, 0)])
    );
}

#[test_log::test]
fn covering_crosses_antimeridian() {
    let transform = camera(LngLat::new(179.9, 0.0), 2.0, 1024.0, 512.0);
    let tiles = transform
        .covering_tiles(&CoveringOptions::default())
        .expect("covering must succeed");

    info!("Tiles: {}", tiles.iter().map(|t| format!("{t}@{}", t.w())).join(", "));

    let copies_per_row: HashMap<(u8, u32), HashSet<i32>> =
        tiles.iter().fold(HashMap::new(), |mut rows, tile| {
            rows.entry((tile.z(), tile.y())).or_default().insert(tile.w());
            rows
        });

    assert!(
        copies_per_row
            .values()
            .any(|copies| copies.contains(&0) && copies.contains(&1))
    );
    assert!(tiles.iter().all(|tile| tile.x() < 4));
}

#[test]
fn covering_below_min_zoom_is_empty() {
    let transform = camera(LngLat::new(0.0, 0.0), 1.0, 1024.0, 1024.0);
    let tiles = transform
        .covering_tiles(&CoveringOptions {
            min_zoom: 3,
            ..CoveringOptions::default()
        })
        .expect("covering must succeed");

    assert!(tiles.is_empty());
}

#[test]
fn covering_above_max_zoom_is_clamped() {
    let transform = camera(LngLat::new(0.0, 0.0), 6.0, 1024.0, 1024.0);
    let options = CoveringOptions {
        max_zoom: 4,
        ..CoveringOptions::default()
    };

    let clamped = transform.covering_tiles(&options).expect("covering must succeed");
    assert!(!clamped.is_empty());
    assert!(clamped.iter().all(|tile| tile.z() == 4));

    let reparsed = transform
        .covering_tiles(&CoveringOptions {
            reparse_overscaled: true,
            ..options
        })
        .expect("covering must succeed");

    // Same footprint, stamped with the zoom it is displayed at.
    assert!(reparsed.iter().all(|tile| tile.z() == 6));
    assert_eq!(
        clamped.iter().map(|t| (t.x(), t.y(), t.w())).collect::<HashSet<_>>(),
        reparsed.iter().map(|t| (t.x(), t.y(), t.w())).collect::<HashSet<_>>()
    );
}

#[test]
fn covering_under_pitch_reaches_further() {
    let flat = tilted(0.0, 0.0);
    let pitched = tilted(60.0, 0.0);
    let options = CoveringOptions::default();

    let flat = flat.covering_tiles(&options).expect("covering must succeed");
    let pitched = pitched.covering_tiles(&options).expect("covering must succeed");

    assert!(pitched.len() > flat.len());
}

#[test]
fn covering_zoom_level_rounding() {
    let transform = camera(LngLat::new(0.0, 0.0), 3.6, 512.0, 512.0);

    let floor = CoveringOptions {
        tile_size: 256.0,
        ..CoveringOptions::default()
    };
    let round = CoveringOptions {
        round_zoom: ZoomRounding::Round,
        ..floor
    };

    assert_eq!(transform.covering_zoom_level(&floor), 4);
    assert_eq!(transform.covering_zoom_level(&round), 5);
    assert_eq!(transform.covering_zoom_level(&CoveringOptions::default()), 3);
}

#[test]
fn zoom_rounding_parses() {
    assert_eq!("round".parse::<ZoomRounding>().ok(), Some(ZoomRounding::Round));
    assert_eq!("Floor".parse::<ZoomRounding>().ok(), Some(ZoomRounding::Floor));
    assert_eq!(ZoomRounding::Round.to_string(), "round");
}

#[test]
fn pos_matrix_is_deterministic() {
    let transform = tilted(45.0, 30.0);
    let tile = TileCoord::new(5, 16, 13, 0);

    let a = transform.calculate_pos_matrix(tile, Some(14)).expect("matrix");
    let b = transform.calculate_pos_matrix(tile, Some(14)).expect("matrix");

    let bits = |m: glam::DMat4| m.to_cols_array().map(f64::to_bits);
    assert_eq!(bits(a), bits(b));
}

#[test]
fn pos_matrix_accepts_tiles_and_coordinates() {
    let transform = tilted(30.0, -20.0);

    let from_tile = transform
        .calculate_pos_matrix(TileCoord::new(3, 4, 3, -1), None)
        .expect("matrix");
    let from_coord = transform
        .calculate_pos_matrix(Coordinate::new(4.0 - 8.0, 3.0, 3.0), None)
        .expect("matrix");
    assert_eq!(from_tile, from_coord);

    // Overscaled tiles reuse their source-zoom ancestor's matrix.
    let overscaled = transform
        .calculate_pos_matrix(TileCoord::new(6, 3, 4, 0), Some(4))
        .expect("matrix");
    let source = transform
        .calculate_pos_matrix(TileCoord::new(4, 3, 4, 0), Some(4))
        .expect("matrix");
    assert_eq!(overscaled, source);
}

#[test]
fn pos_matrix_places_tile_origin_on_screen() {
    let transform = tilted(40.0, 15.0);
    let tile = TileCoord::new(5, 17, 13, 0);

    let clip = transform.calculate_pos_matrix(tile, None).expect("matrix")
        * DVec4::new(0.0, 0.0, 0.0, 1.0);
    let pixel_x = (clip.x / clip.w * 0.5 + 0.5) * transform.width();
    let pixel_y = (clip.y / clip.w * -0.5 + 0.5) * transform.height();

    let expected = transform
        .coordinate_point(Coordinate::new(17.0, 13.0, 5.0))
        .expect("point");

    assert_abs_diff_eq!(pixel_x, expected.x(), epsilon = 1e-6);
    assert_abs_diff_eq!(pixel_y, expected.y(), epsilon = 1e-6);
}

#[test]
fn world_corner_is_screen_corner_at_zoom_zero() {
    let transform = camera(LngLat::new(0.0, 0.0), 0.0, 512.0, 512.0);

    let corner = transform
        .coordinate_point(Coordinate::new(0.0, 0.0, 0.0))
        .expect("point");
    assert_abs_diff_eq!(corner.x(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(corner.y(), 0.0, epsilon = 1e-6);

    let coord = transform
        .point_coordinate(Point::new(512.0, 512.0))
        .expect("coordinate");
    assert_abs_diff_eq!(coord.column, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(coord.row, 1.0, epsilon = 1e-9);
    assert_relative_eq!(coord.zoom, 0.0);
}

#[test]
fn screen_centre_is_camera_centre() {
    for (pitch, bearing) in [(0.0, 0.0), (45.0, 0.0), (30.0, 120.0), (60.0, -75.0)] {
        let transform = tilted(pitch, bearing);
        let centre = transform
            .point_location(transform.center_point())
            .expect("location");

        assert_abs_diff_eq!(centre.lng, 10.0, epsilon = 1e-7);
        assert_abs_diff_eq!(centre.lat, 20.0, epsilon = 1e-7);
    }
}

#[test]
fn location_point_round_trip() {
    let transform = tilted(45.0, 30.0);

    for lnglat in [
        LngLat::new(10.5, 20.3),
        LngLat::new(9.2, 19.8),
        LngLat::new(10.0, 20.0),
    ] {
        let point = transform.location_point(lnglat).expect("point");
        let back = transform.point_location(point).expect("location");

        assert_abs_diff_eq!(back.lng, lnglat.lng, epsilon = 1e-7);
        assert_abs_diff_eq!(back.lat, lnglat.lat, epsilon = 1e-7);
    }
}

#[test]
fn bearing_is_camera_heading() {
    // Facing east, positions east of the centre appear above it.
    let transform = tilted(0.0, 90.0);
    let centre = transform.center_point();
    let east = transform
        .location_point(LngLat::new(10.5, 20.0))
        .expect("point");

    assert_abs_diff_eq!(east.x(), centre.x(), epsilon = 1e-6);
    assert!(east.y() < centre.y());
}

#[test]
fn location_coordinate_round_trip() {
    let transform = camera(LngLat::new(0.0, 0.0), 3.7, 512.0, 512.0);

    let coord = transform.location_coordinate(LngLat::new(0.0, 0.0));
    assert_eq!(coord.zoom, 3.0);
    assert_abs_diff_eq!(coord.column, 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(coord.row, 4.0, epsilon = 1e-9);

    let lnglat = LngLat::new(-73.98, 40.75);
    let back = transform.coordinate_location(transform.location_coordinate(lnglat));
    assert_abs_diff_eq!(back.lng, lnglat.lng, epsilon = 1e-9);
    assert_abs_diff_eq!(back.lat, lnglat.lat, epsilon = 1e-9);
}

#[test]
fn derived_quantities() {
    let transform = Transform::new(TransformState {
        zoom: 2.5,
        bearing: 90.0,
        pitch: 30.0,
        width: 300.0,
        height: 200.0,
        ..TransformState::default()
    })
    .expect("camera must be valid");

    assert_relative_eq!(transform.scale(), 2f64.powf(2.5), epsilon = 1e-12);
    assert_relative_eq!(transform.world_size(), 512.0 * 2f64.powf(2.5), epsilon = 1e-9);
    assert_relative_eq!(transform.bearing(), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_relative_eq!(transform.pitch(), std::f64::consts::PI / 6.0, epsilon = 1e-12);
    assert_eq!(transform.tile_zoom(), 2.0);
    assert_eq!(transform.center_point(), Point::new(150.0, 100.0));
    assert_eq!(transform.size(), Point::new(300.0, 200.0));
    assert_relative_eq!(transform.x(), transform.world_size() / 2.0);
}

#[test]
fn update_merges_and_recomputes() {
    let mut transform = camera(LngLat::new(5.0, 5.0), 3.0, 640.0, 480.0);
    let before = transform.proj_matrix().expect("matrix");

    transform
        .update_state(StateUpdate {
            zoom: Some(4.0),
            ..StateUpdate::default()
        })
        .expect("update must succeed");

    let state = transform.state();
    assert_eq!(state.zoom, 4.0);
    assert_eq!(state.center, LngLat::new(5.0, 5.0));
    assert_eq!((state.width, state.height), (640.0, 480.0));
    assert_ne!(transform.proj_matrix().expect("matrix"), before);
}

#[test]
fn update_constrains_centre_and_zoom() {
    let mut transform = camera(LngLat::new(0.0, 0.0), 1.0, 512.0, 512.0);

    transform
        .update_state(StateUpdate {
            center: Some(LngLat::new(30.0, 89.0)),
            zoom: Some(25.0),
            lng_range: Some([-10.0, 10.0]),
            ..StateUpdate::default()
        })
        .expect("update must succeed");

    let state = transform.state();
    assert_eq!(state.center, LngLat::new(10.0, 85.05113));
    assert_eq!(state.zoom, 20.0);
}

#[test_log::test]
fn unknown_viewport_is_degenerate() {
    let mut transform = Transform::new(TransformState::default()).expect("deferred camera");

    assert_eq!(
        transform.proj_matrix(),
        Err(TransformError::DegenerateCamera(Degeneracy::UnknownViewport))
    );
    assert!(transform.point_coordinate(Point::new(0.0, 0.0)).is_err());
    assert!(
        transform
            .covering_tiles(&CoveringOptions::default())
            .is_err()
    );
    assert_eq!(
        transform.recalculate(),
        Err(TransformError::DegenerateCamera(Degeneracy::UnknownViewport))
    );

    transform
        .update_state(StateUpdate::size(512.0, 512.0))
        .expect("sized camera");
    let matrices = transform.matrices().expect("matrices");
    assert!(matrices.pixel_inverse.is_finite());
    assert!(!matrices.proj.is_nan());
}

#[test]
fn zero_width_is_degenerate() {
    let mut transform = camera(LngLat::new(0.0, 0.0), 1.0, 512.0, 512.0);

    let result = transform.update_state(StateUpdate::size(0.0, 512.0));
    assert!(matches!(result, Err(TransformError::DegenerateCamera(_))));

    // Never stale: the old matrices are gone with the old state.
    assert!(transform.matrices().is_err());
}

#[test]
fn horizon_in_view_is_degenerate() {
    let mut transform = camera(LngLat::new(0.0, 0.0), 1.0, 512.0, 512.0);

    let result = transform.update_state(StateUpdate {
        pitch: Some(80.0),
        max_pitch: Some(85.0),
        ..StateUpdate::default()
    });

    assert_eq!(
        result,
        Err(TransformError::DegenerateCamera(Degeneracy::InvalidPitch))
    );
}

#[test]
fn pitch_is_clamped_to_max_pitch() {
    let mut transform = camera(LngLat::new(0.0, 0.0), 3.0, 512.0, 512.0);

    transform
        .update_state(StateUpdate {
            pitch: Some(80.0),
            ..StateUpdate::default()
        })
        .expect("pitch is clamped, not rejected");
    assert_eq!(transform.state().pitch, 60.0);

    transform
        .update_state(StateUpdate {
            pitch: Some(-10.0),
            ..StateUpdate::default()
        })
        .expect("pitch is clamped, not rejected");
    assert_eq!(transform.state().pitch, 0.0);
}

#[test_log::test]
fn near_horizon_covering_is_bounded() {
    let steep = |pitch: f64| {
        let mut transform = camera(LngLat::new(10.0, 20.0), 16.0, 1024.0, 768.0);
        transform
            .update_state(StateUpdate {
                pitch: Some(pitch),
                max_pitch: Some(85.0),
                ..StateUpdate::default()
            })
            .map(|_| transform)
    };

    // Just short of the horizon the far corners run off towards infinity.
    for pitch in [71.5, 71.56] {
        assert_eq!(
            steep(pitch).err(),
            Some(TransformError::DegenerateCamera(Degeneracy::InvalidPitch))
        );
    }

    let accepted = steep(69.0).expect("far edge within range");
    let tiles = accepted
        .covering_tiles(&CoveringOptions::default())
        .expect("covering must succeed");
    info!("{} tiles at pitch 69", tiles.len());
    assert!(!tiles.is_empty());
    assert!(tiles.len() < 5_000);
}
