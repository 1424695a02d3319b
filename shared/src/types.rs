//! Common enums shared across crates
//!
//! All string-backed so they round-trip through both JSON and SQLite TEXT
//! columns without a mapping table.

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Meal service window a prep list or sale belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ServicePeriod {
    Lunch,
    Dinner,
    AllDay,
}

impl ServicePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServicePeriod::Lunch => "lunch",
            ServicePeriod::Dinner => "dinner",
            ServicePeriod::AllDay => "all_day",
        }
    }
}

impl std::str::FromStr for ServicePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lunch" => Ok(ServicePeriod::Lunch),
            "dinner" => Ok(ServicePeriod::Dinner),
            "all_day" => Ok(ServicePeriod::AllDay),
            other => Err(format!("unknown service period: {other}")),
        }
    }
}

/// Margin health classification for a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Healthy,
    Warning,
    Critical,
}

/// Prep priority for kitchen sequencing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Prep list lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PrepListStatus {
    Draft,
    Completed,
}

/// Menu-engineering quadrant (margin x popularity), French labels kept
/// from the product's menu engineering vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BcgCategory {
    /// High margin, popular
    Phare,
    /// Low margin, popular
    Ancre,
    /// High margin, unpopular
    Derive,
    /// Low margin, unpopular
    Ecueil,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn service_period_round_trips_as_str() {
        for p in [
            ServicePeriod::Lunch,
            ServicePeriod::Dinner,
            ServicePeriod::AllDay,
        ] {
            assert_eq!(ServicePeriod::from_str(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn margin_status_serializes_lowercase() {
        let json = serde_json::to_string(&MarginStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
