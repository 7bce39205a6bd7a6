//! Front-end agnostic state holders for the building screens.
//!
//! Each holder owns the state one screen renders and exposes the actions the
//! screen can trigger. They talk to storage only through
//! [`crate::domain::BuildingUseCases`], so any repository adapter works.

pub mod building_detail;
pub mod building_edit;
pub mod buildings_list;

pub use building_detail::{BuildingDetail, DetailState};
pub use building_edit::{BuildingEditor, EditorEvent, EditorState};
pub use buildings_list::{BuildingsList, TVERSKAYA_QUERY};
