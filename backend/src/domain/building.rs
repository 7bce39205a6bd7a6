//! Building aggregate and its value objects.
//!
//! A building is an office property that either has no parking or offers a
//! fixed number of rentable parking spaces. Every value object validates on
//! construction, so a [`Building`] in hand always satisfies its invariants.

use std::fmt;

use uuid::Uuid;

use super::validation::BuildingValidationError;

/// Stable identifier of a building within the collection.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(String);

impl BuildingId {
    /// Validate and construct a [`BuildingId`].
    pub fn new(id: impl Into<String>) -> Result<Self, BuildingValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BuildingValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(BuildingValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier backed by a random UUID.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for BuildingId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Street address of a building.
///
/// ## Invariants
/// - Not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Validate and construct an [`Address`].
    pub fn new(address: impl Into<String>) -> Result<Self, BuildingValidationError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(BuildingValidationError::EmptyAddress);
        }
        Ok(Self(address))
    }

    /// Case-insensitive substring match against `query`.
    ///
    /// Both sides are lowercased with Unicode rules, independent of the host
    /// locale, so `"ТВЕРСКАЯ ул., 25"` matches `"тверская"`. An empty query
    /// matches every address.
    pub fn matches_query(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(&query.to_lowercase())
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of rentable parking spaces; always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParkingSpaces(i32);

impl ParkingSpaces {
    /// Validate and construct a [`ParkingSpaces`] count.
    pub fn new(spaces: i32) -> Result<Self, BuildingValidationError> {
        if spaces <= 0 {
            return Err(BuildingValidationError::NonPositiveParkingSpaces { value: spaces });
        }
        Ok(Self(spaces))
    }

    /// Raw count.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ParkingSpaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monthly rent charged per parking space; finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MonthlyRent(f64);

impl MonthlyRent {
    /// Validate and construct a [`MonthlyRent`].
    pub fn new(rent: f64) -> Result<Self, BuildingValidationError> {
        if !rent.is_finite() {
            return Err(BuildingValidationError::InvalidMonthlyRent {
                value: rent.to_string(),
            });
        }
        if rent <= 0.0 {
            return Err(BuildingValidationError::NonPositiveMonthlyRent { value: rent });
        }
        Ok(Self(rent))
    }

    /// Raw amount.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Parking facilities offered by a building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parking {
    spaces: ParkingSpaces,
    monthly_rent: MonthlyRent,
}

impl Parking {
    /// Combine validated parking figures.
    pub fn new(spaces: ParkingSpaces, monthly_rent: MonthlyRent) -> Self {
        Self {
            spaces,
            monthly_rent,
        }
    }

    /// Validate raw figures and combine them.
    pub fn try_from_raw(spaces: i32, monthly_rent: f64) -> Result<Self, BuildingValidationError> {
        Ok(Self::new(
            ParkingSpaces::new(spaces)?,
            MonthlyRent::new(monthly_rent)?,
        ))
    }

    /// Number of spaces.
    pub fn spaces(&self) -> ParkingSpaces {
        self.spaces
    }

    /// Rent per space per month.
    pub fn monthly_rent(&self) -> MonthlyRent {
        self.monthly_rent
    }

    /// Revenue when every space is rented for a month.
    #[expect(
        clippy::float_arithmetic,
        reason = "revenue is an informational figure derived from the rent"
    )]
    pub fn monthly_revenue(&self) -> f64 {
        f64::from(self.spaces.get()) * self.monthly_rent.get()
    }
}

/// Which variant a building is, independent of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    /// No parking facilities.
    WithoutParking,
    /// Rentable parking spaces.
    WithParking,
}

impl BuildingKind {
    /// Discriminator stored alongside persisted rows.
    pub const fn discriminator(self) -> &'static str {
        match self {
            Self::WithoutParking => "WITHOUT_PARKING",
            Self::WithParking => "WITH_PARKING",
        }
    }

    /// Resolve a stored discriminator; `None` when it is not recognised.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "WITHOUT_PARKING" => Some(Self::WithoutParking),
            "WITH_PARKING" => Some(Self::WithParking),
            _ => None,
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

/// Office building, with or without parking.
///
/// ## Invariants
/// - `id` uniquely identifies the building within a collection.
/// - `address` is not blank.
/// - Parking figures, when present, are strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub enum Building {
    /// Building that offers no parking.
    WithoutParking {
        /// Stable identifier.
        id: BuildingId,
        /// Street address.
        address: Address,
    },
    /// Building with rentable parking spaces.
    WithParking {
        /// Stable identifier.
        id: BuildingId,
        /// Street address.
        address: Address,
        /// Parking figures.
        parking: Parking,
    },
}

impl Building {
    /// Build a building without parking.
    pub fn without_parking(id: BuildingId, address: Address) -> Self {
        Self::WithoutParking { id, address }
    }

    /// Build a building with parking.
    pub fn with_parking(id: BuildingId, address: Address, parking: Parking) -> Self {
        Self::WithParking {
            id,
            address,
            parking,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &BuildingId {
        match self {
            Self::WithoutParking { id, .. } | Self::WithParking { id, .. } => id,
        }
    }

    /// Street address.
    pub fn address(&self) -> &Address {
        match self {
            Self::WithoutParking { address, .. } | Self::WithParking { address, .. } => address,
        }
    }

    /// Parking figures, if the building has parking.
    pub fn parking(&self) -> Option<&Parking> {
        match self {
            Self::WithoutParking { .. } => None,
            Self::WithParking { parking, .. } => Some(parking),
        }
    }

    /// Variant of this building.
    pub fn kind(&self) -> BuildingKind {
        match self {
            Self::WithoutParking { .. } => BuildingKind::WithoutParking,
            Self::WithParking { .. } => BuildingKind::WithParking,
        }
    }

    /// Replace the address, keeping the identifier and parking data.
    #[must_use]
    pub fn with_address(self, address: Address) -> Self {
        match self {
            Self::WithoutParking { id, .. } => Self::WithoutParking { id, address },
            Self::WithParking { id, parking, .. } => Self::WithParking {
                id,
                address,
                parking,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    //! Value object invariants and accessors.
    use super::*;
    use rstest::rstest;

    fn tverskaya() -> Address {
        Address::new("ТВЕРСКАЯ ул., 25").expect("valid address")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        assert_eq!(BuildingId::new(raw), Err(BuildingValidationError::EmptyId));
    }

    #[rstest]
    fn padded_ids_are_rejected() {
        assert_eq!(
            BuildingId::new(" abc "),
            Err(BuildingValidationError::InvalidId)
        );
    }

    #[rstest]
    fn random_ids_are_distinct() {
        assert_ne!(BuildingId::random(), BuildingId::random());
    }

    #[rstest]
    fn blank_address_is_rejected() {
        assert_eq!(
            Address::new(" \t"),
            Err(BuildingValidationError::EmptyAddress)
        );
    }

    #[rstest]
    #[case("тверская", true)]
    #[case("Тверская", true)]
    #[case("ул., 2", true)]
    #[case("", true)]
    #[case("пушкина", false)]
    fn address_query_ignores_case(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(tverskaya().matches_query(query), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn non_positive_spaces_are_rejected(#[case] raw: i32) {
        assert!(matches!(
            ParkingSpaces::new(raw),
            Err(BuildingValidationError::NonPositiveParkingSpaces { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.5)]
    fn non_positive_rent_is_rejected(#[case] raw: f64) {
        assert!(matches!(
            MonthlyRent::new(raw),
            Err(BuildingValidationError::NonPositiveMonthlyRent { .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn non_finite_rent_is_rejected(#[case] raw: f64) {
        assert!(matches!(
            MonthlyRent::new(raw),
            Err(BuildingValidationError::InvalidMonthlyRent { .. })
        ));
    }

    #[rstest]
    fn revenue_multiplies_spaces_by_rent() {
        let parking = Parking::try_from_raw(100, 5000.0).expect("valid parking");
        assert!((parking.monthly_revenue() - 500_000.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn accessors_cover_both_variants() {
        let id = BuildingId::new("b-1").expect("valid id");
        let plain = Building::without_parking(id.clone(), tverskaya());
        assert_eq!(plain.kind(), BuildingKind::WithoutParking);
        assert!(plain.parking().is_none());

        let parking = Parking::try_from_raw(10, 99.5).expect("valid parking");
        let parked = Building::with_parking(id.clone(), tverskaya(), parking);
        assert_eq!(parked.kind(), BuildingKind::WithParking);
        assert_eq!(parked.id(), &id);
        assert_eq!(parked.parking(), Some(&parking));
    }

    #[rstest]
    fn with_address_keeps_parking() {
        let parking = Parking::try_from_raw(3, 10.0).expect("valid parking");
        let building = Building::with_parking(BuildingId::random(), tverskaya(), parking);
        let moved = building.with_address(Address::new("Новый адрес, 10").expect("valid"));

        assert_eq!(moved.address().as_ref(), "Новый адрес, 10");
        assert_eq!(moved.parking(), Some(&parking));
    }

    #[rstest]
    #[case(BuildingKind::WithoutParking)]
    #[case(BuildingKind::WithParking)]
    fn discriminators_resolve_back(#[case] kind: BuildingKind) {
        assert_eq!(
            BuildingKind::from_discriminator(kind.discriminator()),
            Some(kind)
        );
    }

    #[rstest]
    fn unknown_discriminator_is_none() {
        assert_eq!(BuildingKind::from_discriminator("GARAGE"), None);
    }
}
