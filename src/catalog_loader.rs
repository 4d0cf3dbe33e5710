//! Catalog file loading and parsing.
//!
//! A catalog file has the `.labtiles` extension and lists one tile per line:
//!
//! ```text
//! # name          weight  exits  crossings
//! X               1       UDLR
//! I-vertical      1       UD
//! double-L        0.5     UDLR   UL,DR
//! block           0       -
//! ```
//!
//! Exits are any combination of `U`, `D`, `L` and `R`, or `-` for none. The optional crossings
//! column turns the tile into a tunnel; its crossing ends must cover exactly the listed exits.
//! Blank lines and lines starting with `#` are ignored.

use std::{fs, path::Path};

use color_eyre::eyre::{OptionExt as _, Result as EyreResult};
use log::{debug, warn};

use crate::{
    direction::Directions,
    error::{Error, Result},
    preset::Preset,
    tile::{Crossing, TileCatalog, TileKind},
};

/// Extension of catalog files.
pub const CATALOG_EXTENSION: &str = ".labtiles";

/// Scans the current directory for catalog files and loads them.
///
/// This function searches for files with the `.labtiles` extension in the current working
/// directory, parses them, and adds them to the presets offered in the catalog menu. Files that
/// fail to parse are skipped with a warning in the log.
pub(crate) fn fetch_files(presets: &mut Vec<Preset>) -> EyreResult<()> {
    for file in fs::read_dir(".")? {
        match file {
            Ok(file)
                if !file.file_type()?.is_dir()
                    && file
                        .file_name()
                        .to_str()
                        .ok_or_eyre("failed to convert osstring to string slice")?
                        .ends_with(CATALOG_EXTENSION) =>
            {
                let contents = fs::read_to_string(file.path())?;

                match Preset::new(file.file_name(), &contents) {
                    Ok(preset) => {
                        debug!("loaded catalog {:?} from {}", preset.key, file.path().display());
                        presets.push(preset);
                    }
                    Err(err) => warn!("skipping {}: {err}", file.path().display()),
                }
            }
            Err(err) => return Err(err.into()),
            _ => {}
        }
    }

    Ok(())
}

/// Loads a single catalog file given on the command line.
///
/// Explicit paths may use any extension; the preset is named after the file stem.
pub(crate) fn load_file(path: &Path) -> EyreResult<Preset> {
    let contents = fs::read_to_string(path)?;
    let key = path
        .file_stem()
        .ok_or_eyre("catalog path does not name a file")?
        .to_str()
        .ok_or_eyre("failed to convert osstring to string slice")?;

    Ok(Preset {
        key: key.to_owned(),
        catalog: parse_catalog(&contents)?,
    })
}

/// Parses the contents of a catalog file and validates the result.
///
/// # Errors
///
/// Returns [`Error::CatalogParse`] for the first malformed line, naming it by its one-based line
/// number, or the validation error of the assembled catalog.
pub fn parse_catalog(input: &str) -> Result<TileCatalog> {
    let mut catalog = TileCatalog::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (tile, weight) = parse_line(line).map_err(|reason| Error::CatalogParse {
            line: index + 1,
            reason,
        })?;
        if catalog.find(&tile.name).is_some() {
            return Err(Error::CatalogParse {
                line: index + 1,
                reason: format!("tile {:?} is listed twice", tile.name),
            });
        }
        catalog = catalog.with(tile, weight);
    }

    catalog.validate()?;
    Ok(catalog)
}

/// Parses one non-comment line into a tile and its weight.
fn parse_line(line: &str) -> std::result::Result<(TileKind, f64), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, weight, exits, rest @ ..] = fields.as_slice() else {
        return Err("expected a name, a weight and exits".to_owned());
    };

    let weight: f64 = weight
        .parse()
        .map_err(|err| format!("{weight:?} is not a number: {err}"))?;
    let exits =
        Directions::parse(exits).ok_or_else(|| format!("{exits:?} is not a set of exits"))?;

    let tile = match rest {
        [] => TileKind::new(*name, exits),
        [crossings] => {
            let crossings = crossings
                .split(',')
                .map(|code| Crossing::parse(code).ok_or_else(|| format!("{code:?} is not a crossing")))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let tile = TileKind::tunnel(*name, crossings);
            if tile.exits != exits {
                return Err(format!(
                    "crossings of {name:?} cover {} but the exits are {exits}",
                    tile.exits
                ));
            }
            tile
        }
        _ => return Err("unexpected trailing fields".to_owned()),
    };

    Ok((tile, weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        direction::Direction,
        tile::{TileCategory, TileId},
    };

    #[test]
    fn test_parse_catalog_valid() {
        let input = "\
# a small catalog
X           1    UDLR

I-vertical  2.5  UD
double-L    0.5  UDLR  UL,DR
block       0    -
";
        let catalog = parse_catalog(input).expect("valid catalog");

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.find("I-vertical"), Some(TileId(1)));
        assert!((catalog.weight(TileId(1)) - 2.5).abs() < f64::EPSILON);
        assert_eq!(
            catalog.tile(TileId(2)).map(|tile| tile.category.clone()),
            Some(TileCategory::Tunnel(vec![
                Crossing(Direction::Up, Direction::Left),
                Crossing(Direction::Down, Direction::Right),
            ]))
        );
        assert_eq!(
            catalog.tile(TileId(3)).map(|tile| tile.exits),
            Some(Directions::NONE)
        );
    }

    #[test]
    fn test_parse_catalog_missing_fields() {
        let result = parse_catalog("X 1\n");

        assert!(matches!(result, Err(Error::CatalogParse { line: 1, .. })));
    }

    #[test]
    fn test_parse_catalog_bad_weight() {
        let result = parse_catalog("X 1 UDLR\nI heavy UD\n");

        assert!(matches!(
            result,
            Err(Error::CatalogParse { line: 2, ref reason })
                if reason.contains("invalid float literal")
        ));
    }

    #[test]
    fn test_parse_catalog_bad_exits() {
        let result = parse_catalog("X 1 UDLQ\n");

        assert!(matches!(result, Err(Error::CatalogParse { line: 1, .. })));
    }

    #[test]
    fn test_parse_catalog_crossings_must_match_exits() {
        let result = parse_catalog("bridge 1 UD UD,LR\n");

        assert!(matches!(result, Err(Error::CatalogParse { line: 1, .. })));
    }

    #[test]
    fn test_parse_catalog_bad_crossing() {
        let result = parse_catalog("bridge 1 UDLR UU,LR\n");

        assert!(matches!(result, Err(Error::CatalogParse { line: 1, .. })));
    }

    #[test]
    fn test_parse_catalog_duplicate_name() {
        let result = parse_catalog("X 1 UDLR\n# again\nX 2 UDLR\n");

        assert!(matches!(result, Err(Error::CatalogParse { line: 3, .. })));
    }

    #[test]
    fn test_parse_catalog_negative_weight() {
        let result = parse_catalog("X -1 UDLR\n");

        assert!(matches!(result, Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn test_parse_catalog_all_zero_weights() {
        let result = parse_catalog("X 0 UDLR\nblock 0 -\n");

        assert!(matches!(result, Err(Error::ZeroWeightCatalog)));
    }

    #[test]
    fn test_load_file_accepts_any_extension() {
        let path = std::env::temp_dir().join(format!("corridor-{}.txt", std::process::id()));
        fs::write(&path, "I-vertical 1 UD\nI-horizontal 1 LR\n").expect("temp dir is writable");

        let preset = load_file(&path);
        let _ = fs::remove_file(&path);
        let preset = preset.expect("plain text catalog loads");

        assert_eq!(preset.key, format!("corridor-{}", std::process::id()));
        assert_eq!(preset.catalog.len(), 2);
    }

    #[test]
    fn test_load_file_missing_path() {
        assert!(load_file(Path::new("no-such-dir/none.labtiles")).is_err());
    }

    #[test]
    fn test_parse_catalog_empty_input() {
        assert!(matches!(
            parse_catalog("# nothing here\n"),
            Err(Error::EmptyCatalog)
        ));
    }
}
