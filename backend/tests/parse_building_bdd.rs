//! Behaviour tests for parsing one-line building descriptions.
//!
//! These scenarios cover both accepted shapes and the validation codes
//! reported for rejected input.

use buildings::domain::{Building, BuildingValidationError, parse_building};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, scenario, then, when};

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

/// Test world holding the outcome of the last parse.
#[derive(Default, ScenarioState)]
struct ParseWorld {
    outcome: Slot<Result<Building, BuildingValidationError>>,
}

impl ParseWorld {
    fn building(&self) -> Building {
        self.outcome
            .get()
            .expect("text should have been parsed")
            .expect("parsing should succeed")
    }
}

#[fixture]
fn world() -> ParseWorld {
    ParseWorld::default()
}

/// Remove the quotes Gherkin placeholders keep around captured text.
fn unquote(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the text {input} is parsed")]
fn the_text_is_parsed(world: &ParseWorld, input: String) {
    world.outcome.set(parse_building(unquote(&input)));
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("a building without parking is produced")]
fn a_building_without_parking(world: &ParseWorld) {
    assert!(world.building().parking().is_none());
}

#[then("a building with {spaces} spaces at {rent} per month is produced")]
fn a_building_with_parking(world: &ParseWorld, spaces: String, rent: String) {
    let building = world.building();
    let parking = building.parking().expect("building should have parking");
    assert_eq!(
        parking.spaces().get(),
        spaces.parse::<i32>().expect("numeric spaces")
    );
    assert_eq!(
        parking.monthly_rent().get().to_string(),
        rent.parse::<f64>().expect("numeric rent").to_string()
    );
}

#[then("its address is {address}")]
fn its_address_is(world: &ParseWorld, address: String) {
    assert_eq!(world.building().address().as_ref(), unquote(&address));
}

#[then("parsing fails with code {code}")]
fn parsing_fails_with_code(world: &ParseWorld, code: String) {
    let outcome = world.outcome.get().expect("text should have been parsed");
    match outcome {
        Ok(building) => panic!("expected a validation failure, got {building:?}"),
        Err(err) => assert_eq!(err.code(), unquote(&code)),
    }
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Bare address yields a building without parking"
)]
fn bare_address_yields_a_building_without_parking(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Three segments yield a building with parking"
)]
fn three_segments_yield_a_building_with_parking(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Quoted addresses are unwrapped"
)]
fn quoted_addresses_are_unwrapped(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Two segments are rejected"
)]
fn two_segments_are_rejected(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Non-positive parking spaces are rejected"
)]
fn non_positive_parking_spaces_are_rejected(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Non-numeric rent is rejected"
)]
fn non_numeric_rent_is_rejected(world: ParseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/parse_building.feature",
    name = "Blank address is rejected"
)]
fn blank_address_is_rejected(world: ParseWorld) {
    let _ = world;
}
