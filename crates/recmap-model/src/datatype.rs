use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared data type allow-list for output fields.
///
/// Unrecognized declared types are a validation warning, not an error, so
/// configurations authored against a newer allow-list keep compiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Numeric,
    Date,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Numeric => "Numeric",
            DataType::Date => "Date",
            DataType::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    /// Case-insensitive parse against the allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "numeric" => Ok(DataType::Numeric),
            "date" => Ok(DataType::Date),
            "boolean" => Ok(DataType::Boolean),
            _ => Err(format!("Unknown data type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("NUMERIC".parse::<DataType>(), Ok(DataType::Numeric));
        assert_eq!("Date".parse::<DataType>(), Ok(DataType::Date));
        assert!("decimal".parse::<DataType>().is_err());
    }
}
