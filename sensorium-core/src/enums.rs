//! Enum types for Sensorium entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// LOOKUP SUPPORT
// ============================================================================

/// An enum whose variants can be listed and parsed by wire name.
///
/// Parsing is case-insensitive and ignores surrounding whitespace.
pub trait LookupEnum: Copy + Sized + 'static {
    /// Name used to address this enum in lookup requests.
    const ENUM_NAME: &'static str;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    /// Wire representation of this variant.
    fn as_str(&self) -> &'static str;

    /// Parse a variant from its wire name.
    fn parse(value: &str) -> Result<Self, EnumParseError> {
        let needle = value.trim();
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| EnumParseError {
                enum_name: Self::ENUM_NAME,
                value: value.to_string(),
            })
    }

    /// Wire names of all variants.
    fn variant_names() -> Vec<&'static str> {
        Self::variants().iter().map(|v| v.as_str()).collect()
    }
}

/// Error when parsing an unknown enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {enum_name} value: {value}")]
pub struct EnumParseError {
    pub enum_name: &'static str,
    pub value: String,
}

macro_rules! lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl LookupEnum for $name {
            const ENUM_NAME: &'static str = $label;

            fn variants() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as LookupEnum>::parse(s)
            }
        }
    };
}

// ============================================================================
// DOMAIN ENUMS
// ============================================================================

lookup_enum! {
    /// Physical quantity a sensor measures.
    SensorKind as "sensor_kind" {
        Temperature => "TEMPERATURE",
        Humidity => "HUMIDITY",
        Pressure => "PRESSURE",
        Vibration => "VIBRATION",
        Acoustic => "ACOUSTIC",
        Optical => "OPTICAL",
    }
}

lookup_enum! {
    /// Operational state of a sensor.
    SensorStatus as "sensor_status" {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Maintenance => "MAINTENANCE",
        Faulty => "FAULTY",
    }
}

lookup_enum! {
    /// Progress of an analysis run.
    AnalysisStatus as "analysis_status" {
        Pending => "PENDING",
        Running => "RUNNING",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

lookup_enum! {
    RequestPriority as "request_priority" {
        Low => "LOW",
        Normal => "NORMAL",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

lookup_enum! {
    /// Lifecycle of a service request raised from an analysis.
    RequestStatus as "request_status" {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Answered => "ANSWERED",
        Closed => "CLOSED",
    }
}

lookup_enum! {
    SolutionStatus as "solution_status" {
        Proposed => "PROPOSED",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
        Applied => "APPLIED",
    }
}

/// Names accepted by [`lookup_variants`].
pub const LOOKUP_ENUM_NAMES: &[&str] = &[
    SensorKind::ENUM_NAME,
    SensorStatus::ENUM_NAME,
    AnalysisStatus::ENUM_NAME,
    RequestPriority::ENUM_NAME,
    RequestStatus::ENUM_NAME,
    SolutionStatus::ENUM_NAME,
];

/// List the variant names of a lookup enum by its name.
///
/// The name is matched case-insensitively and `-` is treated as `_`, so
/// `sensor-kind`, `SENSOR_KIND` and `sensor_kind` are equivalent.
pub fn lookup_variants(name: &str) -> Option<Vec<&'static str>> {
    let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
    match normalized.as_str() {
        n if n == SensorKind::ENUM_NAME => Some(SensorKind::variant_names()),
        n if n == SensorStatus::ENUM_NAME => Some(SensorStatus::variant_names()),
        n if n == AnalysisStatus::ENUM_NAME => Some(AnalysisStatus::variant_names()),
        n if n == RequestPriority::ENUM_NAME => Some(RequestPriority::variant_names()),
        n if n == RequestStatus::ENUM_NAME => Some(RequestStatus::variant_names()),
        n if n == SolutionStatus::ENUM_NAME => Some(SolutionStatus::variant_names()),
        _ => None,
    }
}

// ============================================================================
// ENTITY TYPE
// ============================================================================

/// Entity type discriminator. Each type owns one second-level cache region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EntityType {
    Sensor,
    Analysis,
    Request,
    Response,
    Solution,
}

impl EntityType {
    /// Every entity type, in region order.
    pub const ALL: [EntityType; 5] = [
        EntityType::Sensor,
        EntityType::Analysis,
        EntityType::Request,
        EntityType::Response,
        EntityType::Solution,
    ];

    /// Name of the cache region holding entities of this type.
    pub fn region_name(&self) -> &'static str {
        match self {
            EntityType::Sensor => "sensorium.sensor",
            EntityType::Analysis => "sensorium.analysis",
            EntityType::Request => "sensorium.request",
            EntityType::Response => "sensorium.response",
            EntityType::Solution => "sensorium.solution",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            EntityType::Sensor => "Sensor",
            EntityType::Analysis => "Analysis",
            EntityType::Request => "Request",
            EntityType::Response => "Response",
            EntityType::Solution => "Solution",
        };
        f.write_str(value)
    }
}
