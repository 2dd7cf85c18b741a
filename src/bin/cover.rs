use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};

use tilecam::{
    CoveringOptions, LngLat, StateUpdate, TileCoord, Transform, TransformState, ZoomRounding,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lists the tiles covering a map camera's view")]
struct Args {
    /// Camera centre longitude, degrees
    #[arg(long, env = "TILECAM_LNG", default_value_t = 0.0, allow_negative_numbers = true)]
    lng: f64,

    /// Camera centre latitude, degrees
    #[arg(long, env = "TILECAM_LAT", default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    #[arg(long, env = "TILECAM_ZOOM", default_value_t = 0.0)]
    zoom: f64,

    /// Clockwise compass heading, degrees
    #[arg(long, env = "TILECAM_BEARING", default_value_t = 0.0, allow_negative_numbers = true)]
    bearing: f64,

    /// Tilt away from straight down, degrees
    #[arg(long, env = "TILECAM_PITCH", default_value_t = 0.0)]
    pitch: f64,

    /// Steepest pitch allowed, degrees
    #[arg(long, env = "TILECAM_MAX_PITCH", default_value_t = 60.0)]
    max_pitch: f64,

    #[arg(long, env = "TILECAM_ALTITUDE", default_value_t = 1.5)]
    altitude: f64,

    /// Viewport width, pixels
    #[arg(long, env = "TILECAM_WIDTH", default_value_t = 1024.0)]
    width: f64,

    /// Viewport height, pixels
    #[arg(long, env = "TILECAM_HEIGHT", default_value_t = 768.0)]
    height: f64,

    /// Edge length of the source's tiles, pixels
    #[arg(long, env = "TILECAM_TILE_SIZE", default_value_t = 512.0)]
    tile_size: f64,

    #[arg(long, env = "TILECAM_MIN_ZOOM", default_value_t = 0)]
    min_zoom: u8,

    /// Deepest zoom the source has data for
    #[arg(long, env = "TILECAM_MAX_ZOOM", default_value_t = 22)]
    max_zoom: u8,

    /// `floor` or `round`
    #[arg(long, env = "TILECAM_ROUND_ZOOM", default_value = "floor")]
    round_zoom: ZoomRounding,

    /// Stamp overscaled tiles with their display zoom
    #[arg(long, env = "TILECAM_REPARSE_OVERSCALED")]
    reparse_overscaled: bool,

    /// Also print the model matrix of this tile (`z/x/y` or `z/x/y@w`)
    #[arg(long)]
    pos_matrix: Option<TileCoord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load `.env` file before the logger, so it may carry `RUST_LOG`
    let loaded = dotenv();
    env_logger::init();

    if let Err(err) = loaded {
        warn!("No .env loaded: {err}");
    }

    let args = Args::parse();

    let mut transform = Transform::new(TransformState::default())?;

    transform.update_state(StateUpdate {
        center: Some(LngLat::new(args.lng, args.lat)),
        zoom: Some(args.zoom),
        bearing: Some(args.bearing),
        pitch: Some(args.pitch),
        max_pitch: Some(args.max_pitch),
        altitude: Some(args.altitude),
        ..StateUpdate::size(args.width, args.height)
    })?;

    let options = CoveringOptions {
        tile_size: args.tile_size,
        min_zoom: args.min_zoom,
        max_zoom: args.max_zoom,
        round_zoom: args.round_zoom,
        reparse_overscaled: args.reparse_overscaled,
    };

    info!(
        "Covering zoom {} for {:?}",
        transform.covering_zoom_level(&options),
        transform.state()
    );

    let tiles = transform.covering_tiles(&options)?;
    for tile in &tiles {
        println!("{tile} {}", tile.w());
    }

    if let Some(tile) = args.pos_matrix {
        let matrix = transform.calculate_pos_matrix(tile, Some(args.max_zoom))?;
        for row in 0..4 {
            let row = matrix.row(row);
            println!("[{:>16.6} {:>16.6} {:>16.6} {:>16.6}]", row.x, row.y, row.z, row.w);
        }
    }

    Ok(())
}
