//! Per-state regulatory and climate reference data.
//!
//! Legal reserve fractions follow the Forest Code biome split (Amazon 80%,
//! Cerrado transition 35%, everything else 20%). Rainfall and
//! evapotranspiration are state means in millimetres per year.

use serde::Serialize;

/// Reserve fraction applied to states missing from the table.
pub const DEFAULT_LEGAL_RESERVE: f64 = 0.20;
/// Mean annual rainfall (mm) applied to states missing from the table.
pub const DEFAULT_RAINFALL_MM: f64 = 1500.0;
/// Mean annual evapotranspiration (mm) applied to states missing from the table.
pub const DEFAULT_EVAPOTRANSPIRATION_MM: f64 = 1500.0;

/// (state, legal reserve fraction, rainfall mm, evapotranspiration mm)
const STATE_TABLE: &[(&str, f64, f64, f64)] = &[
    ("AC", 0.80, 2158.0, 1958.0),
    ("AL", 0.20, 1325.0, 1711.0),
    ("AM", 0.80, 2609.0, 2221.0),
    ("AP", 0.80, 2525.0, 2182.0),
    ("BA", 0.20, 926.0, 1722.0),
    ("CE", 0.20, 1123.0, 1878.0),
    ("DF", 0.35, 1478.0, 1304.0),
    ("ES", 0.20, 1309.0, 1756.0),
    ("GO", 0.35, 1511.0, 1689.0),
    ("MA", 0.35, 1586.0, 2181.0),
    ("MG", 0.35, 1226.0, 1512.0),
    ("MS", 0.35, 1219.0, 2000.0),
    ("MT", 0.35, 1588.0, 2066.0),
    ("PA", 0.80, 2252.0, 2199.0),
    ("PB", 0.20, 1837.0, 2022.0),
    ("PE", 0.20, 930.0, 1932.0),
    ("PI", 0.20, 1039.0, 2668.0),
    ("PR", 0.20, 1802.0, 1378.0),
    ("RJ", 0.20, 1403.0, 1722.0),
    ("RN", 0.20, 1214.0, 2062.0),
    ("RO", 0.80, 1950.0, 1750.0),
    ("RR", 0.80, 1754.0, 1800.0),
    ("RS", 0.20, 1635.0, 1427.0),
    ("SC", 0.20, 1921.0, 1242.0),
    ("SE", 0.20, 1068.0, 1804.0),
    ("SP", 0.20, 1450.0, 1427.0),
    ("TO", 0.35, 1619.0, 2138.0),
];

/// Reference values the environmental index reads for one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalProfile {
    pub legal_reserve: f64,
    pub rainfall_mm: f64,
    pub evapotranspiration_mm: f64,
}

impl RegionalProfile {
    pub const DEFAULT: RegionalProfile = RegionalProfile {
        legal_reserve: DEFAULT_LEGAL_RESERVE,
        rainfall_mm: DEFAULT_RAINFALL_MM,
        evapotranspiration_mm: DEFAULT_EVAPOTRANSPIRATION_MM,
    };

    /// Profile for a two-letter state code, falling back to [`RegionalProfile::DEFAULT`].
    pub fn for_state(code: &str) -> RegionalProfile {
        lookup(code).unwrap_or(Self::DEFAULT)
    }

    pub fn is_known_state(code: &str) -> bool {
        lookup(code).is_some()
    }
}

fn lookup(code: &str) -> Option<RegionalProfile> {
    let code = code.trim();
    STATE_TABLE
        .iter()
        .find(|(state, ..)| state.eq_ignore_ascii_case(code))
        .map(|&(_, legal_reserve, rainfall_mm, evapotranspiration_mm)| RegionalProfile {
            legal_reserve,
            rainfall_mm,
            evapotranspiration_mm,
        })
}

pub fn legal_reserve_fraction(code: &str) -> f64 {
    RegionalProfile::for_state(code).legal_reserve
}

pub fn mean_rainfall_mm(code: &str) -> f64 {
    RegionalProfile::for_state(code).rainfall_mm
}

pub fn mean_evapotranspiration_mm(code: &str) -> f64 {
    RegionalProfile::for_state(code).evapotranspiration_mm
}
