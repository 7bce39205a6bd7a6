//! Text rendering of buildings for the console.

use crate::domain::Building;

/// Render an amount with at most two fractional digits.
///
/// Trailing zeros are dropped, so `5000.0` renders as `5000` and `2500.5`
/// as `2500.5`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    match fixed.split_once('.') {
        Some((whole, fraction)) => {
            let significant = fraction.trim_end_matches('0');
            if significant.is_empty() {
                whole.to_owned()
            } else {
                format!("{whole}.{significant}")
            }
        }
        None => fixed,
    }
}

/// Multi-line description of a building.
pub fn format_building(building: &Building) -> String {
    let header = format!("ID: {}\nAddress: {}", building.id(), building.address());
    match building.parking() {
        None => format!("{header}\nType: Building without parking"),
        Some(parking) => format!(
            "{header}\nType: Building with parking\nParking spaces: {}\n\
             Monthly rent per space: {}\nTotal monthly parking revenue: {}",
            parking.spaces().get(),
            format_amount(parking.monthly_rent().get()),
            format_amount(parking.monthly_revenue()),
        ),
    }
}
