//! Field-level validation for the interactive building form.
//!
//! The form keeps every field as the raw text the user typed. Each field is
//! validated on its own so the form can show one reason per field; a building
//! is only produced once every field passes.

use std::fmt;

use super::building::{
    Address, Building, BuildingId, BuildingKind, MonthlyRent, Parking, ParkingSpaces,
};

/// Reason a single form field is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// Address is blank.
    AddressEmpty,
    /// Parking spaces left blank for a building with parking.
    ParkingSpacesRequired,
    /// Parking spaces is not an integer.
    ParkingSpacesInvalid,
    /// Parking spaces is zero or negative.
    ParkingSpacesPositive,
    /// Monthly rent left blank for a building with parking.
    MonthlyRentRequired,
    /// Monthly rent is not a finite number.
    MonthlyRentInvalid,
    /// Monthly rent is zero or negative.
    MonthlyRentPositive,
}

impl FieldError {
    /// Stable key used to look up the localised message.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AddressEmpty => "validation_address_empty",
            Self::ParkingSpacesRequired => "validation_parking_spaces_required",
            Self::ParkingSpacesInvalid => "validation_parking_spaces_invalid",
            Self::ParkingSpacesPositive => "validation_parking_spaces_positive",
            Self::MonthlyRentRequired => "validation_monthly_rent_required",
            Self::MonthlyRentInvalid => "validation_monthly_rent_invalid",
            Self::MonthlyRentPositive => "validation_monthly_rent_positive",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-field validation outcome of a [`BuildingForm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Address error, if any.
    pub address: Option<FieldError>,
    pub parking_spaces: Option<FieldError>,
    pub monthly_rent: Option<FieldError>,
}

impl FormErrors {
    /// `true` when no field carries an error.
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.parking_spaces.is_none() && self.monthly_rent.is_none()
    }
}

/// Raw contents of the building form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingForm {
    pub address: String,
    pub kind: BuildingKind,
    pub parking_spaces: String,
    pub monthly_rent: String,
}

impl Default for BuildingForm {
    fn default() -> Self {
        Self {
            address: String::new(),
            kind: BuildingKind::WithoutParking,
            parking_spaces: String::new(),
            monthly_rent: String::new(),
        }
    }
}

impl BuildingForm {
    /// Prefill the form from an existing building.
    pub fn from_building(building: &Building) -> Self {
        let (parking_spaces, monthly_rent) = building.parking().map_or_else(
            || (String::new(), String::new()),
            |parking| {
                (
                    parking.spaces().get().to_string(),
                    parking.monthly_rent().get().to_string(),
                )
            },
        );
        Self {
            address: building.address().as_ref().to_owned(),
            kind: building.kind(),
            parking_spaces,
            monthly_rent,
        }
    }

    /// Validate the address field.
    pub fn address_error(&self) -> Option<FieldError> {
        self.address
            .trim()
            .is_empty()
            .then_some(FieldError::AddressEmpty)
    }

    /// Validate the parking spaces field; only checked for buildings with parking.
    pub fn parking_spaces_error(&self) -> Option<FieldError> {
        if self.kind != BuildingKind::WithParking {
            return None;
        }
        let raw = self.parking_spaces.trim();
        if raw.is_empty() {
            return Some(FieldError::ParkingSpacesRequired);
        }
        match raw.parse::<i32>() {
            Err(_) => Some(FieldError::ParkingSpacesInvalid),
            Ok(value) if ParkingSpaces::new(value).is_err() => {
                Some(FieldError::ParkingSpacesPositive)
            }
            Ok(_) => None,
        }
    }

    /// Validate the monthly rent field; only checked for buildings with parking.
    pub fn monthly_rent_error(&self) -> Option<FieldError> {
        if self.kind != BuildingKind::WithParking {
            return None;
        }
        let raw = self.monthly_rent.trim();
        if raw.is_empty() {
            return Some(FieldError::MonthlyRentRequired);
        }
        match raw.parse::<f64>() {
            Ok(value) if !value.is_finite() => Some(FieldError::MonthlyRentInvalid),
            Err(_) => Some(FieldError::MonthlyRentInvalid),
            Ok(value) if MonthlyRent::new(value).is_err() => Some(FieldError::MonthlyRentPositive),
            Ok(_) => None,
        }
    }

    /// Validate every field at once.
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            address: self.address_error(),
            parking_spaces: self.parking_spaces_error(),
            monthly_rent: self.monthly_rent_error(),
        }
    }

    /// Convert a fully valid form into a building with the given id.
    ///
    /// Returns every field error when any field fails.
    pub fn to_building(&self, id: BuildingId) -> Result<Building, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let address = Address::new(self.address.trim()).map_err(|_| errors)?;
        match self.kind {
            BuildingKind::WithoutParking => Ok(Building::without_parking(id, address)),
            BuildingKind::WithParking => {
                let spaces = self.parking_spaces.trim().parse::<i32>().ok();
                let rent = self.monthly_rent.trim().parse::<f64>().ok();
                let parking = spaces
                    .zip(rent)
                    .and_then(|(spaces, rent)| Parking::try_from_raw(spaces, rent).ok())
                    .ok_or(errors)?;
                Ok(Building::with_parking(id, address, parking))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parking_form(spaces: &str, rent: &str) -> BuildingForm {
        BuildingForm {
            address: "Тверская ул., 25".to_owned(),
            kind: BuildingKind::WithParking,
            parking_spaces: spaces.to_owned(),
            monthly_rent: rent.to_owned(),
        }
    }

    #[rstest]
    fn empty_form_reports_only_address() {
        let errors = BuildingForm::default().validate();
        assert_eq!(
            errors,
            FormErrors {
                address: Some(FieldError::AddressEmpty),
                parking_spaces: None,
                monthly_rent: None,
            }
        );
    }

    #[rstest]
    #[case("", Some(FieldError::ParkingSpacesRequired))]
    #[case("ten", Some(FieldError::ParkingSpacesInvalid))]
    #[case("0", Some(FieldError::ParkingSpacesPositive))]
    #[case("-3", Some(FieldError::ParkingSpacesPositive))]
    #[case("12", None)]
    fn parking_spaces_rules(#[case] raw: &str, #[case] expected: Option<FieldError>) {
        assert_eq!(parking_form(raw, "100").parking_spaces_error(), expected);
    }

    #[rstest]
    #[case("", Some(FieldError::MonthlyRentRequired))]
    #[case("cheap", Some(FieldError::MonthlyRentInvalid))]
    #[case("inf", Some(FieldError::MonthlyRentInvalid))]
    #[case("0", Some(FieldError::MonthlyRentPositive))]
    #[case("-1.5", Some(FieldError::MonthlyRentPositive))]
    #[case("2500.50", None)]
    fn monthly_rent_rules(#[case] raw: &str, #[case] expected: Option<FieldError>) {
        assert_eq!(parking_form("5", raw).monthly_rent_error(), expected);
    }

    #[rstest]
    fn parking_fields_are_ignored_without_parking() {
        let mut form = parking_form("junk", "junk");
        form.kind = BuildingKind::WithoutParking;
        assert!(form.validate().is_empty());
    }

    #[rstest]
    fn invalid_form_returns_every_error() {
        let mut form = parking_form("", "-1");
        form.address = " ".to_owned();

        let errors = form
            .to_building(BuildingId::random())
            .expect_err("form is invalid");
        assert_eq!(errors.address, Some(FieldError::AddressEmpty));
        assert_eq!(errors.parking_spaces, Some(FieldError::ParkingSpacesRequired));
        assert_eq!(errors.monthly_rent, Some(FieldError::MonthlyRentPositive));
    }

    #[rstest]
    fn valid_form_round_trips_through_building() {
        let id = BuildingId::new("b-42").expect("valid id");
        let building = parking_form("100", "5000").to_building(id.clone()).expect("valid form");

        assert_eq!(building.id(), &id);
        let prefilled = BuildingForm::from_building(&building);
        assert_eq!(prefilled.parking_spaces, "100");
        assert_eq!(prefilled.monthly_rent, "5000");
        assert_eq!(prefilled.kind, BuildingKind::WithParking);
    }
}
