//! Position to points lookup.
//!
//! Positions are 1-based. Finishing outside a table's length earns zero
//! points, and so does any position under an unknown point system: a
//! configuration mismatch must never block a results import.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PointsConfigError, Result};

/// Enduro series table.
pub const ENDURO: &[u32] = &[
    500, 450, 425, 400, 380, 360, 340, 320, 300, 280, 260, 240, 220, 200, 190, 180, 170, 160, 150,
    140, 135, 130, 125, 120, 115, 110, 105, 100, 95, 90, 85, 80, 75, 70, 65, 60, 55, 50, 45, 40,
    35, 30, 25, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// Downhill qualification table.
pub const DH_KVAL: &[u32] = &[
    100, 80, 60, 55, 50, 45, 40, 35, 30, 20, 18, 16, 14, 12, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// Downhill race table.
pub const DH_RACE: &[u32] = &[
    420, 370, 365, 345, 330, 315, 300, 285, 270, 260, 242, 224, 206, 188, 180, 171, 162, 153, 144,
    135, 131, 127, 123, 119, 115, 110, 105, 100, 95, 90, 85, 80, 75, 70, 65, 60, 55, 50, 45, 40,
    35, 30, 25, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// Table for all other disciplines.
pub const OTHERS: &[u32] = &[
    250, 225, 212, 200, 190, 180, 170, 160, 150, 140, 130, 120, 110, 100, 95, 90, 85, 80, 75, 70,
    68, 65, 62, 60, 57, 55, 52, 50, 47, 45, 42, 40, 37, 35, 32, 30, 27, 25, 22, 20, 17, 15, 12, 10,
    9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// Point systems a series can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointSystem {
    Enduro,
    DhKval,
    DhRace,
    Others,
    /// The series' own table.
    Custom,
}

impl PointSystem {
    pub const NAMED: [PointSystem; 4] = [Self::Enduro, Self::DhKval, Self::DhRace, Self::Others];

    /// Id as persisted by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enduro => "ENDURO",
            Self::DhKval => "DH_KVAL",
            Self::DhRace => "DH_RACE",
            Self::Others => "OTHERS",
            Self::Custom => "CUSTOM",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "ENDURO" => Some(Self::Enduro),
            "DH_KVAL" => Some(Self::DhKval),
            "DH_RACE" => Some(Self::DhRace),
            "OTHERS" => Some(Self::Others),
            "CUSTOM" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Name shown in the series admin.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Enduro => "Enduro",
            Self::DhKval => "DH Kval",
            Self::DhRace => "DH Race",
            Self::Others => "Övriga",
            Self::Custom => "Anpassat",
        }
    }

    /// Built-in table, `None` for [`PointSystem::Custom`].
    pub fn builtin_table(&self) -> Option<&'static [u32]> {
        match self {
            Self::Enduro => Some(ENDURO),
            Self::DhKval => Some(DH_KVAL),
            Self::DhRace => Some(DH_RACE),
            Self::Others => Some(OTHERS),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for PointSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points for `position` under `system` using the built-in tables.
///
/// `custom` is consulted only for the `CUSTOM` system. Unknown systems,
/// a missing custom table, position 0 and positions past the end of the
/// table all give 0.
pub fn points_for(position: u32, system: &str, custom: Option<&[u32]>) -> u32 {
    let table = match PointSystem::parse(system) {
        Some(PointSystem::Custom) => custom,
        Some(named) => named.builtin_table(),
        None => None,
    };
    table.map_or(0, |table| lookup(table, position))
}

fn lookup(table: &[u32], position: u32) -> u32 {
    position
        .checked_sub(1)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or(0)
}

/// Named point tables plus an optional per-series custom table.
///
/// Immutable once built; pass it to whatever computes points so tests can
/// swap in synthetic tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    systems: BTreeMap<String, Vec<u32>>,
    custom: Option<Vec<u32>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PointsFile {
    custom: Option<Vec<u32>>,
    systems: BTreeMap<String, Vec<u32>>,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PointsTable {
    /// The four built-in systems, no custom table.
    pub fn builtin() -> Self {
        let systems = PointSystem::NAMED
            .iter()
            .filter_map(|system| {
                system
                    .builtin_table()
                    .map(|table| (system.as_str().to_string(), table.to_vec()))
            })
            .collect();
        Self {
            systems,
            custom: None,
        }
    }

    /// A table with only the given named systems.
    pub fn from_systems(systems: BTreeMap<String, Vec<u32>>) -> Result<Self> {
        for (name, table) in &systems {
            validate_system(name, table)?;
        }
        Ok(Self {
            systems,
            custom: None,
        })
    }

    #[must_use]
    pub fn with_custom(mut self, table: Vec<u32>) -> Self {
        self.custom = Some(table);
        self
    }

    /// Built-ins extended or overridden by a TOML document.
    ///
    /// ```toml
    /// custom = [50, 40, 30]
    ///
    /// [systems]
    /// XC = [100, 90, 80]
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::parse_toml(source, Path::new("<inline>"))
    }

    /// Reads [`PointsTable::from_toml_str`] input from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| PointsConfigError::io(path, e))?;
        Self::parse_toml(&source, path)
    }

    fn parse_toml(source: &str, path: &Path) -> Result<Self> {
        let file: PointsFile = toml::from_str(source).map_err(|source| PointsConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let mut table = Self::builtin();
        for (name, points) in file.systems {
            validate_system(&name, &points)?;
            table.systems.insert(name, points);
        }
        table.custom = file.custom;
        Ok(table)
    }

    pub fn custom(&self) -> Option<&[u32]> {
        self.custom.as_deref()
    }

    /// Table for a system id; `CUSTOM` resolves to the custom table.
    pub fn table(&self, system: &str) -> Option<&[u32]> {
        if system == PointSystem::Custom.as_str() {
            return self.custom();
        }
        self.systems.get(system).map(Vec::as_slice)
    }

    /// Named systems in id order.
    pub fn systems(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.systems
            .iter()
            .map(|(name, table)| (name.as_str(), table.as_slice()))
    }

    /// Points for a 1-based `position`; 0 when the system is unknown or the
    /// position falls outside the table.
    pub fn points_for(&self, position: u32, system: &str) -> u32 {
        match self.table(system) {
            Some(table) => lookup(table, position),
            None => {
                warn!(system, "no points table for system, awarding 0 points");
                0
            }
        }
    }
}

fn validate_system(name: &str, table: &[u32]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PointsConfigError::EmptySystemName);
    }
    if name == PointSystem::Custom.as_str() {
        return Err(PointsConfigError::ReservedSystemName {
            name: name.to_string(),
        });
    }
    if let Some(index) = table.windows(2).position(|pair| pair[1] > pair[0]) {
        return Err(PointsConfigError::NotMonotonic {
            system: name.to_string(),
            position: index + 2,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_do_not_increase() {
        for system in PointSystem::NAMED {
            let table = system.builtin_table().unwrap();
            assert!(validate_system(system.as_str(), table).is_ok(), "{system}");
        }
    }

    #[test]
    fn builtin_table_lengths() {
        assert_eq!(ENDURO.len(), 63);
        assert_eq!(DH_KVAL.len(), 24);
        assert_eq!(DH_RACE.len(), 63);
        assert_eq!(OTHERS.len(), 53);
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(points_for(1, "DH_KVAL", None), 100);
        assert_eq!(points_for(24, "DH_KVAL", None), 1);
        assert_eq!(points_for(25, "DH_KVAL", None), 0);
        assert_eq!(points_for(0, "DH_KVAL", None), 0);
    }

    #[test]
    fn custom_needs_a_table() {
        assert_eq!(points_for(2, "CUSTOM", Some(&[10, 7, 5])), 7);
        assert_eq!(points_for(2, "CUSTOM", None), 0);
        assert_eq!(points_for(1, "XC", Some(&[10])), 0);
    }

    #[test]
    fn system_ids_round_trip() {
        for system in [
            PointSystem::Enduro,
            PointSystem::DhKval,
            PointSystem::DhRace,
            PointSystem::Others,
            PointSystem::Custom,
        ] {
            assert_eq!(PointSystem::parse(system.as_str()), Some(system));
        }
        assert_eq!(PointSystem::parse("enduro"), None);
        assert_eq!(PointSystem::Others.display_name(), "Övriga");
    }

    #[test]
    fn decreasing_check_reports_position() {
        let err = validate_system("BAD", &[10, 8, 9]).unwrap_err();
        assert!(matches!(
            err,
            PointsConfigError::NotMonotonic { position: 3, .. }
        ));
    }
}
