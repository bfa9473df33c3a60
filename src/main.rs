//! arenagen - deterministic level generation for grid-based dungeon crawlers
//!
//! Loads JSON data packs, runs one generator and prints a JSON summary of the result.

mod config;
mod summary;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use arenagen_assets::{
    load_pack, CityDefinition, DataPack, ExeTables, InfData, MifMap, NameTables, PrefabLibrary,
};
use arenagen_world::{DungeonParams, LevelAssembler, WILD_HEIGHT, WILD_WIDTH};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{GenerationConfig, DEFAULT_CONFIG_PATH};
use crate::summary::{summarize, summarize_wilderness, MapSummary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Procedural city, dungeon and wilderness generation", long_about = None)]
struct Args {
    /// TOML config with data-pack paths and generation defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Also write the full assembled map as JSON
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Generate the configured city and name its buildings
    City {
        /// Override the city seed
        #[arg(long, value_parser = parse_seed)]
        seed: Option<u32>,
    },
    /// Generate a random dungeon from the chunk prefabs
    Dungeon {
        #[arg(long, value_parser = parse_seed)]
        seed: Option<u32>,
        /// Chunks along the source x axis
        #[arg(long)]
        width: Option<usize>,
        /// Chunks along the source y axis
        #[arg(long)]
        depth: Option<usize>,
        /// Four levels instead of one or two
        #[arg(long)]
        artifact: bool,
    },
    /// Generate the wilderness around the configured city
    Wild {
        #[arg(long, value_parser = parse_seed)]
        seed: Option<u32>,
        /// Report the entrances of the chunk at wilderness cell X,Y
        #[arg(long, value_parser = parse_chunk)]
        chunk: Option<(usize, usize)>,
    },
    /// Assemble a premade interior MIF as-is
    Interior {
        /// MIF data pack (JSON)
        mif: PathBuf,
    },
}

/// Decimal or `0x`-prefixed hexadecimal.
fn parse_seed(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("invalid seed {value:?}: {err}"))
}

/// `X,Y` wilderness cell.
fn parse_chunk(value: &str) -> Result<(usize, usize), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid chunk coordinate {part:?}: {err}"))
    };
    let (x, y) = (parse(x)?, parse(y)?);
    if x >= WILD_WIDTH || y >= WILD_HEIGHT {
        return Err(format!(
            "chunk {x},{y} is outside the {WILD_WIDTH}x{WILD_HEIGHT} wilderness"
        ));
    }
    Ok((x, y))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let config = GenerationConfig::load(&args.config)?;
    let summary = run(&args.command, &config, args.out.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load<T: DataPack>(path: &Path, what: &str) -> Result<T> {
    load_pack(path).with_context(|| format!("failed to load {what} from {}", path.display()))
}

fn write_output<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let Some(path) = out else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote assembled map");
    Ok(())
}

fn run(command: &Command, config: &GenerationConfig, out: Option<&Path>) -> Result<MapSummary> {
    let data = &config.data;
    let inf: InfData = load(&data.inf, "INF data")?;
    let exe: ExeTables = load(&data.exe_tables, "executable tables")?;

    match command {
        Command::City { seed } => {
            let names: NameTables = load(&data.names, "name tables")?;
            let library: PrefabLibrary = load(&data.prefabs, "prefab library")?;
            let mut city: CityDefinition = load(&data.city, "city definition")?;
            let skeleton: MifMap = load(&data.city_skeleton, "city skeleton")?;
            if let Some(seed) = seed {
                city.city_seed = *seed;
            }

            let map = LevelAssembler::new(&inf, &exe)
                .assemble_city(&city, &skeleton, &library, &names)
                .with_context(|| format!("failed to generate city {}", city.name))?;
            write_output(out, &map)?;
            Ok(summarize("city", &map))
        }
        Command::Dungeon {
            seed,
            width,
            depth,
            artifact,
        } => {
            let library: PrefabLibrary = load(&data.prefabs, "prefab library")?;
            let defaults = &config.dungeon;
            let params = DungeonParams {
                seed: seed.unwrap_or(defaults.seed),
                width_chunks: width.unwrap_or(defaults.width_chunks),
                depth_chunks: depth.unwrap_or(defaults.depth_chunks),
                is_artifact: *artifact || defaults.is_artifact,
            };

            let map = LevelAssembler::new(&inf, &exe)
                .assemble_dungeon(&params, &library)
                .with_context(|| format!("failed to generate dungeon {params:?}"))?;
            write_output(out, &map)?;
            Ok(summarize("dungeon", &map))
        }
        Command::Wild { seed, chunk } => {
            let library: PrefabLibrary = load(&data.prefabs, "prefab library")?;
            let city: CityDefinition = load(&data.city, "city definition")?;
            let skeleton: MifMap = load(&data.city_skeleton, "city skeleton")?;
            let seed = seed.or(config.wild.seed).unwrap_or(city.wild_seed);

            let map = LevelAssembler::new(&inf, &exe)
                .assemble_wilderness(seed, &city, &skeleton, &library)
                .with_context(|| format!("failed to generate wilderness {seed:#x}"))?;
            write_output(out, &map)?;
            let entrances = chunk
                .map(|(x, y)| map.chunk_entrances(x, y, &city, &exe.city_gen))
                .unwrap_or_default();
            Ok(summarize_wilderness(&map, entrances))
        }
        Command::Interior { mif } => {
            let mif: MifMap = load(mif, "interior MIF")?;
            let map = LevelAssembler::new(&inf, &exe).assemble_interior(&mif);
            write_output(out, &map)?;
            Ok(summarize("interior", &map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_accept_hex_and_decimal() {
        assert_eq!(parse_seed("4660"), Ok(0x1234));
        assert_eq!(parse_seed("0x1234"), Ok(0x1234));
        assert_eq!(parse_seed("0XFF"), Ok(255));
        assert!(parse_seed("0xZZ").is_err());
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn dungeon_flags_parse() {
        let args = Args::try_parse_from([
            "arenagen",
            "dungeon",
            "--seed",
            "0x10",
            "--width",
            "3",
            "--artifact",
            "--out",
            "target/dungeon.json",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(args.out, Some(PathBuf::from("target/dungeon.json")));
        assert_eq!(
            args.command,
            Command::Dungeon {
                seed: Some(16),
                width: Some(3),
                depth: None,
                artifact: true,
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["arenagen"]).is_err());
        let args = Args::try_parse_from(["arenagen", "-c", "alt.toml", "wild"]).unwrap();
        assert_eq!(args.config, PathBuf::from("alt.toml"));
        assert_eq!(
            args.command,
            Command::Wild {
                seed: None,
                chunk: None
            }
        );
    }

    #[test]
    fn wild_chunk_flag_is_bounded() {
        let args = Args::try_parse_from(["arenagen", "wild", "--chunk", "12, 40"]).unwrap();
        assert_eq!(
            args.command,
            Command::Wild {
                seed: None,
                chunk: Some((12, 40))
            }
        );
        assert!(parse_chunk("64,0").is_err());
        assert!(parse_chunk("3").is_err());
        assert!(parse_chunk("a,1").is_err());
        assert_eq!(parse_chunk("63,63"), Ok((63, 63)));
    }

    #[test]
    fn missing_data_pack_names_the_file() {
        let mut config = GenerationConfig::default();
        config.data.inf = PathBuf::from("missing/city.inf.json");
        let command = Command::Wild {
            seed: None,
            chunk: None,
        };
        let err = run(&command, &config, None).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("INF data"), "{message}");
        assert!(message.contains("missing/city.inf.json"), "{message}");
    }
}
