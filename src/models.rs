use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Statistics period as labelled in `content.stats.Periods`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    All,
    FirstHalf,
    SecondHalf,
}

impl Period {
    pub fn get_all() -> Vec<Period> {
        vec![Period::All, Period::FirstHalf, Period::SecondHalf]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::All => "All",
            Period::FirstHalf => "FirstHalf",
            Period::SecondHalf => "SecondHalf",
        }
    }
}

impl FromStr for Period {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Period::All),
            "FirstHalf" => Ok(Period::FirstHalf),
            "SecondHalf" => Ok(Period::SecondHalf),
            _ => Err(ParseStringError)
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Key of the side's lineup object in `content.lineup`.
    pub fn lineup_key(&self) -> &'static str {
        match self {
            Side::Home => "homeTeam",
            Side::Away => "awayTeam",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Starter,
    Sub,
    Unavailable,
}

impl Role {
    pub fn get_all() -> Vec<Role> {
        vec![Role::Starter, Role::Sub, Role::Unavailable]
    }

    /// Key of the player group in a side's lineup object.
    pub fn group_key(&self) -> &'static str {
        match self {
            Role::Starter => "starters",
            Role::Sub => "subs",
            Role::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

impl Display for ParseStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized value")
    }
}

/// Identifier that upstream sends as a number in one field and a string in another.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Number(i64),
}

impl StringOrNum {
    pub fn to_num(&self) -> Option<i64> {
        match self {
            StringOrNum::String(str) => str.trim().parse::<i64>().ok(),
            StringOrNum::Number(n) => Some(*n),
        }
    }

    pub fn to_str(&self) -> String {
        match self {
            StringOrNum::String(str) => str.trim().to_owned(),
            StringOrNum::Number(n) => n.to_string(),
        }
    }
}

impl From<i64> for StringOrNum {
    fn from(n: i64) -> Self {
        StringOrNum::Number(n)
    }
}

impl From<&str> for StringOrNum {
    fn from(s: &str) -> Self {
        StringOrNum::String(s.to_string())
    }
}

impl Display for StringOrNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_number_ids_normalize_to_same_text() {
        let a: StringOrNum = serde_json::from_str("\"100\"").unwrap();
        let b: StringOrNum = serde_json::from_str("100").unwrap();
        assert_eq!(a.to_str(), b.to_str());
        assert_eq!(a.to_num(), Some(100));
        assert_eq!(b.to_num(), Some(100));
    }

    #[test]
    fn non_numeric_id_has_no_number() {
        let id = StringOrNum::from("abc");
        assert_eq!(id.to_num(), None);
        assert_eq!(id.to_str(), "abc");
    }

    #[test]
    fn period_labels_parse_back() {
        for period in Period::get_all() {
            assert_eq!(period.label().parse::<Period>(), Ok(period));
        }
        assert_eq!("Overtime".parse::<Period>(), Err(ParseStringError));
    }

    #[test]
    fn side_and_role_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Away).unwrap(), "\"away\"");
        assert_eq!(serde_json::to_string(&Role::Unavailable).unwrap(), "\"unavailable\"");
    }
}
