//! Domain primitives, validation, use cases, and ports.
//!
//! Purpose: define the building aggregate and the contract storage adapters
//! fulfil. Types are immutable once constructed; every constructor validates
//! its invariants.
//!
//! Public surface:
//! - `Building`: office property with or without parking.
//! - `BuildingValidationError`: reason a value fails validation, with a
//!   stable code.
//! - `BuildingForm` and `FieldError`: per-field validation for interactive
//!   edits.
//! - `BuildingUseCases`: use cases wired to a [`ports::BuildingRepository`].

pub mod building;
pub mod form;
pub mod ports;
pub mod use_cases;
pub mod validation;

pub use self::building::{
    Address, Building, BuildingId, BuildingKind, MonthlyRent, Parking, ParkingSpaces,
};
pub use self::form::{BuildingForm, FieldError, FormErrors};
pub use self::use_cases::{
    AddBuilding, BuildingUseCases, DeleteBuilding, GetAllBuildings, GetBuildingById,
    ParseBuilding, SearchBuildingsByAddress, UpdateBuilding,
};
pub use self::validation::{BuildingValidationError, parse_building};
