//! Named tile catalogs offered in the catalog menu.
//!
//! This module contains the `Preset` struct pairing a display name with a tile catalog, the
//! built-in presets, and the conversion from a loaded catalog file.

use std::ffi::OsString;

use color_eyre::eyre::{OptionExt as _, Result};

use crate::{
    catalog_loader::{parse_catalog, CATALOG_EXTENSION},
    tile::TileCatalog,
};

/// A named tile catalog.
///
/// This structure represents an entry of the catalog menu. It is used within a vector to get a
/// kind of ordered hashmap, built-in presets first and loaded files after them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Preset {
    /// Display name of the preset.
    ///
    /// For loaded files, this is the filename without the file extension.
    pub(crate) key: String,
    /// The tile catalog itself.
    pub(crate) catalog: TileCatalog,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            key: "Default".to_owned(),
            catalog: TileCatalog::standard(),
        }
    }
}

impl Preset {
    /// Builds a new preset from a filename and the contents of a catalog file.
    ///
    /// This function parses the catalog and extracts a clean name by removing the `.labtiles`
    /// extension from the filename.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The `OsString` cannot be converted to a string slice
    /// - The filename doesn't contain the expected ".labtiles" extension
    /// - The contents are not a valid catalog
    pub(crate) fn new(key: OsString, contents: &str) -> Result<Self> {
        let mut file_name = key
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?
            .to_owned();
        file_name.truncate({
            file_name
                .rfind(CATALOG_EXTENSION)
                .ok_or_eyre("failed to find extension in file name")?
        });

        Ok(Self {
            key: file_name,
            catalog: parse_catalog(contents)?,
        })
    }

    /// The presets always available, the default one first.
    pub(crate) fn builtin() -> Vec<Self> {
        vec![
            Self::default(),
            Self {
                key: "Corridors".to_owned(),
                catalog: TileCatalog::corridors(),
            },
            Self {
                key: "Straight".to_owned(),
                catalog: TileCatalog::straight(),
            },
            Self {
                key: "Cross".to_owned(),
                catalog: TileCatalog::cross(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_default() {
        let preset = Preset::default();

        assert_eq!(preset.key, "Default");
        assert_eq!(preset.catalog.len(), 13);
        assert!(preset.catalog.validate().is_ok());
    }

    #[test]
    fn test_builtin_presets_are_valid() {
        let presets = Preset::builtin();

        assert_eq!(
            presets.iter().map(|preset| preset.key.as_str()).collect::<Vec<_>>(),
            vec!["Default", "Corridors", "Straight", "Cross"]
        );
        for preset in &presets {
            assert!(preset.catalog.validate().is_ok(), "{} is invalid", preset.key);
        }
    }

    #[test]
    fn test_preset_new_valid_input() {
        let preset = Preset::new(OsString::from("rooms.labtiles"), "X 1 UDLR\nI 2 UD\n")
            .expect("Failed to create preset");

        assert_eq!(preset.key, "rooms");
        assert_eq!(preset.catalog.len(), 2);
    }

    #[test]
    fn test_preset_new_multiple_extensions() {
        let preset = Preset::new(OsString::from("rooms.backup.labtiles"), "X 1 UDLR\n")
            .expect("Failed to create preset");

        assert_eq!(preset.key, "rooms.backup");
    }

    #[test]
    fn test_preset_new_missing_extension() {
        let result = Preset::new(OsString::from("rooms"), "X 1 UDLR\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_preset_new_invalid_contents() {
        let result = Preset::new(OsString::from("broken.labtiles"), "X one UDLR\n");

        assert!(result.is_err());
    }
}
