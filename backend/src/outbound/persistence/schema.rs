//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` when a migration changes
//! the table.

diesel::table! {
    /// Office buildings.
    ///
    /// `seq` is the SQLite rowid alias and only orders rows; `id` is the
    /// domain identifier and carries a unique constraint.
    buildings (seq) {
        /// Insertion sequence (rowid alias).
        seq -> BigInt,
        /// Domain identifier.
        id -> Text,
        /// Street address.
        address -> Text,
        /// Variant discriminator: `WITHOUT_PARKING` or `WITH_PARKING`.
        kind -> Text,
        /// Parking spaces; NULL for buildings without parking.
        parking_spaces -> Nullable<Integer>,
        /// Monthly rent per space; NULL for buildings without parking.
        monthly_parking_rent -> Nullable<Double>,
        /// Creation time in milliseconds since the Unix epoch.
        created_at -> BigInt,
    }
}
