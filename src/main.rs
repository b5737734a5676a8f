use anyhow::{Context, Result};
use arroyo::{Settings, preview};
use clap::{Parser, Subcommand};
use formats::Direction;
use glam::IVec2;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arroyo")]
#[command(about = "Inspect sprite and map containers and the isometric grids")]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a sprite file and print its frames
    Sprite {
        path: PathBuf,
        /// Direction to draw (0 = NE .. 5 = NW)
        #[arg(short, long, default_value_t = 0)]
        direction: u8,
        /// Draw every frame of the direction as ASCII
        #[arg(long)]
        draw: bool,
    },
    /// Load a map by name from the asset root
    Map { name: String },
    /// Project a tile index onto the screen, or a screen point back to a tile
    Tile {
        index: Option<u32>,
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        screen: Option<Vec<i32>>,
        /// Use the 100x100 floor grid instead of the hex grid
        #[arg(long)]
        square: bool,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config.unwrap_or_else(arroyo::default_settings_path));

    match cli.command {
        Commands::Sprite {
            path,
            direction,
            draw,
        } => {
            let direction = Direction::try_from(direction)
                .map_err(|_| anyhow::anyhow!("direction must be 0..=5, got {direction}"))?;
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let sheet = formats::decode_sprite(&bytes)
                .with_context(|| format!("decoding {}", path.display()))?;

            print!("{}", preview::describe_sprite(&sheet));
            if draw {
                for frame in &sheet.direction(direction).frames {
                    println!();
                    print!("{}", preview::frame_to_ascii(frame));
                }
            }
        }
        Commands::Map { name } => {
            let mut store = settings.asset_store();
            let map = store.map(&name);
            print!("{}", preview::describe_map(&map));
        }
        Commands::Tile {
            index,
            screen,
            square,
        } => {
            let camera = settings.camera();
            if let Some(index) = index {
                let pos = if square {
                    camera.square_tile_to_screen(index)
                } else {
                    camera.tile_to_screen(index)
                };
                println!("tile {index} -> screen ({}, {})", pos.x, pos.y);
            }
            if let Some([x, y]) = screen.as_deref() {
                let point = IVec2::new(*x, *y);
                let tile = if square {
                    camera.screen_to_square_tile(point)
                } else {
                    camera.screen_to_tile(point)
                };
                println!("screen ({x}, {y}) -> tile {tile}");
            }
        }
    }

    Ok(())
}
