//! Validation errors and the free-text building format.
//!
//! Free text takes one of two shapes:
//!
//! - `<address>` produces a building without parking;
//! - `<address>;<spaces>;<rent>` produces a building with parking.
//!
//! Segments are trimmed and an address wrapped in double quotes is unwrapped,
//! so `"Тверская ул., 25";100;5000.0` is accepted as typed in the console
//! help. Parsing never partially succeeds.

use thiserror::Error;

use super::building::{Address, Building, BuildingId, MonthlyRent, Parking, ParkingSpaces};

/// Separator between free-text segments.
pub const SEGMENT_SEPARATOR: char = ';';

/// Reasons a building or one of its fields fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildingValidationError {
    /// Identifier is blank.
    #[error("building id must not be empty")]
    EmptyId,
    /// Identifier carries surrounding whitespace.
    #[error("building id must not contain surrounding whitespace")]
    InvalidId,
    /// Address is blank.
    #[error("address cannot be empty")]
    EmptyAddress,
    /// Parking spaces segment is not an integer.
    #[error("invalid number of parking spaces: '{value}'")]
    InvalidParkingSpaces { value: String },
    /// Parking spaces is zero or negative.
    #[error("number of parking spaces must be positive, got {value}")]
    NonPositiveParkingSpaces { value: i32 },
    /// Monthly rent segment is not a finite number.
    #[error("invalid monthly rent: '{value}'")]
    InvalidMonthlyRent { value: String },
    /// Monthly rent is zero or negative.
    #[error("monthly rent must be positive, got {value}")]
    NonPositiveMonthlyRent { value: f64 },
    /// Free text has neither one nor three segments.
    #[error(
        "invalid format ({segments} segments): use <address> for a building without parking \
         or <address>;<parking_spaces>;<monthly_rent> for a building with parking"
    )]
    InvalidFormat { segments: usize },
}

impl BuildingValidationError {
    /// Stable reason code, suitable as a lookup key for localised messages.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "validation_id_empty",
            Self::InvalidId => "validation_id_invalid",
            Self::EmptyAddress => "validation_address_empty",
            Self::InvalidParkingSpaces { .. } => "validation_parking_spaces_invalid",
            Self::NonPositiveParkingSpaces { .. } => "validation_parking_spaces_positive",
            Self::InvalidMonthlyRent { .. } => "validation_monthly_rent_invalid",
            Self::NonPositiveMonthlyRent { .. } => "validation_monthly_rent_positive",
            Self::InvalidFormat { .. } => "validation_format_invalid",
        }
    }
}

/// Parse free text into a new building with a freshly generated id.
pub fn parse_building(input: &str) -> Result<Building, BuildingValidationError> {
    let segments: Vec<&str> = input.split(SEGMENT_SEPARATOR).map(str::trim).collect();
    match segments.as_slice() {
        [address] => Ok(Building::without_parking(
            BuildingId::random(),
            parse_address(address)?,
        )),
        [address, spaces, rent] => {
            let valid_address = parse_address(address)?;
            let parking = Parking::new(parse_parking_spaces(spaces)?, parse_monthly_rent(rent)?);
            Ok(Building::with_parking(
                BuildingId::random(),
                valid_address,
                parking,
            ))
        }
        other => Err(BuildingValidationError::InvalidFormat {
            segments: other.len(),
        }),
    }
}

/// Validate an address segment, unwrapping surrounding double quotes.
pub fn parse_address(raw: &str) -> Result<Address, BuildingValidationError> {
    Address::new(strip_quotes(raw.trim()).trim())
}

/// Parse and validate a parking spaces segment.
pub fn parse_parking_spaces(raw: &str) -> Result<ParkingSpaces, BuildingValidationError> {
    let trimmed = raw.trim();
    let spaces = trimmed
        .parse::<i32>()
        .map_err(|_| BuildingValidationError::InvalidParkingSpaces {
            value: trimmed.to_owned(),
        })?;
    ParkingSpaces::new(spaces)
}

/// Parse and validate a monthly rent segment.
pub fn parse_monthly_rent(raw: &str) -> Result<MonthlyRent, BuildingValidationError> {
    let trimmed = raw.trim();
    let rent = trimmed
        .parse::<f64>()
        .map_err(|_| BuildingValidationError::InvalidMonthlyRent {
            value: trimmed.to_owned(),
        })?;
    MonthlyRent::new(rent)
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}
