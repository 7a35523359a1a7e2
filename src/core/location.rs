use super::error::TaxError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Valuation sub-area inside a locality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Zone {
    A,
    B,
    C,
    D,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::A, Zone::B, Zone::C, Zone::D];

    /// Row index into zone × rank tables
    pub fn index(self) -> usize {
        match self {
            Zone::A => 0,
            Zone::B => 1,
            Zone::C => 2,
            Zone::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::D => "D",
        }
    }
}

impl FromStr for Zone {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Zone::A),
            "B" => Ok(Zone::B),
            "C" => Ok(Zone::C),
            "D" => Ok(Zone::D),
            _ => Err(TaxError::UnknownZone(s.to_string())),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locality importance class. Rank 0 is the capital, V the smallest villages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Rank {
    #[serde(rename = "0")]
    R0,
    I,
    II,
    III,
    IV,
    V,
}

impl Rank {
    pub const ALL: [Rank; 6] = [Rank::R0, Rank::I, Rank::II, Rank::III, Rank::IV, Rank::V];

    /// Column index into zone × rank tables
    pub fn index(self) -> usize {
        match self {
            Rank::R0 => 0,
            Rank::I => 1,
            Rank::II => 2,
            Rank::III => 3,
            Rank::IV => 4,
            Rank::V => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::R0 => "0",
            Rank::I => "I",
            Rank::II => "II",
            Rank::III => "III",
            Rank::IV => "IV",
            Rank::V => "V",
        }
    }
}

impl FromStr for Rank {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "0" => Ok(Rank::R0),
            "I" => Ok(Rank::I),
            "II" => Ok(Rank::II),
            "III" => Ok(Rank::III),
            "IV" => Ok(Rank::IV),
            "V" => Ok(Rank::V),
            _ => Err(TaxError::UnknownRank(s.to_string())),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone × rank lookup shared by the building coefficients and the
/// intravilan construction land ranges.
pub type ZoneRankTable<T> = [[T; 6]; 4];

pub fn zone_rank_lookup<T: Copy>(
    table: &ZoneRankTable<T>,
    zone: Zone,
    rank: Rank,
) -> Result<T, TaxError> {
    table
        .get(zone.index())
        .and_then(|row| row.get(rank.index()))
        .copied()
        .ok_or_else(|| TaxError::InvalidZoneRank {
            zone: zone.to_string(),
            rank: rank.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_zone_case_insensitive() {
        assert_eq!("a".parse::<Zone>(), Ok(Zone::A));
        assert_eq!(" D ".parse::<Zone>(), Ok(Zone::D));
        assert_eq!(
            "E".parse::<Zone>(),
            Err(TaxError::UnknownZone("E".to_string()))
        );
    }

    #[test]
    fn parse_rank() {
        assert_eq!("0".parse::<Rank>(), Ok(Rank::R0));
        assert_eq!("iv".parse::<Rank>(), Ok(Rank::IV));
        assert_eq!(
            "VI".parse::<Rank>(),
            Err(TaxError::UnknownRank("VI".to_string()))
        );
    }

    #[test]
    fn rank_serializes_as_roman_numeral() {
        assert_eq!(serde_json::to_string(&Rank::R0).unwrap(), "\"0\"");
        assert_eq!(serde_json::to_string(&Rank::III).unwrap(), "\"III\"");
        let rank: Rank = serde_json::from_str("\"0\"").unwrap();
        assert_eq!(rank, Rank::R0);
    }

    #[test]
    fn indices_cover_whole_table() {
        let table: ZoneRankTable<usize> = [
            [0, 1, 2, 3, 4, 5],
            [10, 11, 12, 13, 14, 15],
            [20, 21, 22, 23, 24, 25],
            [30, 31, 32, 33, 34, 35],
        ];
        for zone in Zone::ALL {
            for rank in Rank::ALL {
                let value = zone_rank_lookup(&table, zone, rank).unwrap();
                assert_eq!(value, zone.index() * 10 + rank.index());
            }
        }
    }
}
