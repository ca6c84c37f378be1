use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Skill tier a match is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    B,
    C,
    D,
}

impl Class {
    pub const ALL: [Class; 3] = [Class::B, Class::C, Class::D];

    /// Number of round-robin groups the class is split into.
    pub fn group_count(self) -> u8 {
        match self {
            Class::B | Class::C => 4,
            Class::D => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Class::B => "B",
            Class::C => "C",
            Class::D => "D",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Class {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(Class::B),
            "C" => Ok(Class::C),
            "D" => Ok(Class::D),
            other => Err(format!("unknown class {other:?}")),
        }
    }
}

/// A round-robin bracket: group numbers are only unique within a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    pub class: Class,
    pub number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub class: Class,
    pub group: u8,
    pub player1: String,
    pub player2: String,
}

impl MatchRecord {
    pub fn group_ref(&self) -> Group {
        Group {
            class: self.class,
            number: self.group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub sets1: u8,
    pub sets2: u8,
    pub games1: u32,
    pub games2: u32,
    #[serde(default)]
    pub tiebreaks1: u32,
    #[serde(default)]
    pub tiebreaks2: u32,
}

impl Score {
    /// The side with more sets wins; equal sets is a tie.
    pub fn winner(&self) -> Winner {
        match self.sets1.cmp(&self.sets2) {
            std::cmp::Ordering::Greater => Winner::Player1,
            std::cmp::Ordering::Less => Winner::Player2,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub fixture: MatchRecord,
    pub winner: Winner,
    #[serde(flatten)]
    pub score: Score,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewResult {
    #[serde(flatten)]
    pub fixture: MatchRecord,
    #[serde(flatten)]
    pub score: Score,
}

/// Raw filter inputs as they arrive from a query string; empty values mean "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub player: Option<String>,
    pub date: Option<String>,
    pub class: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    pub class: String,
    pub group: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub affected: usize,
    pub refresh: bool,
}

/// Accepts `HH:MM` or `HH:MM:SS`; seconds are dropped so the stored time
/// always matches its `HH:MM` serialized form.
pub fn parse_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))?;
    Ok(truncate_to_minute(parsed))
}

pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}
