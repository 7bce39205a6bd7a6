//! State for the create/edit building form.
//!
//! Field setters re-validate only the field they change so the form can show
//! errors while the user types. `save` validates everything again before
//! touching the repository.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{BuildingRepository, BuildingRepositoryError};
use crate::domain::{
    Building, BuildingForm, BuildingId, BuildingKind, BuildingUseCases, FormErrors,
};

/// Error key raised when any field fails on save.
pub const VALIDATION_ERRORS: &str = "validation_errors";
/// Error key raised when the repository rejects a save.
pub const SAVE_BUILDING_ERROR: &str = "save_building_error";
/// Error key raised when the building to edit does not exist.
pub const BUILDING_NOT_FOUND: &str = "building_not_found";
/// Error key raised when the building to edit cannot be read.
pub const LOAD_BUILDING_ERROR: &str = "load_building_error";

/// One-shot outcome the form screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The building was stored; the screen can close.
    SaveSuccess,
    /// Error key to show to the user.
    ShowError(&'static str),
}

/// Everything the form screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    /// Id of the building being edited; `None` while creating.
    pub id: Option<BuildingId>,
    /// Raw field values.
    pub form: BuildingForm,
    /// Current error per field.
    pub errors: FormErrors,
    /// Whether saving updates an existing building.
    pub edit_mode: bool,
}

/// Form state holder for creating or editing a building.
pub struct BuildingEditor<R> {
    use_cases: Arc<BuildingUseCases<R>>,
    state: EditorState,
}

impl<R: BuildingRepository> BuildingEditor<R> {
    /// Editor holding an empty creation form.
    pub fn new(use_cases: Arc<BuildingUseCases<R>>) -> Self {
        Self {
            use_cases,
            state: EditorState::default(),
        }
    }

    /// Current form state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Prepare the form.
    ///
    /// `None` starts a new building. `Some(id)` loads that building and
    /// switches to edit mode; failures are reported as an event and leave the
    /// form untouched.
    pub async fn load(&mut self, id: Option<&str>) -> Option<EditorEvent> {
        let Some(raw_id) = id else {
            self.state = EditorState::default();
            return None;
        };
        let Ok(id) = BuildingId::new(raw_id) else {
            return Some(EditorEvent::ShowError(BUILDING_NOT_FOUND));
        };
        match self.use_cases.get_by_id.execute(&id).await {
            Ok(Some(building)) => {
                self.state = EditorState {
                    form: BuildingForm::from_building(&building),
                    id: Some(id),
                    errors: FormErrors::default(),
                    edit_mode: true,
                };
                None
            }
            Ok(None) => Some(EditorEvent::ShowError(BUILDING_NOT_FOUND)),
            Err(err) => {
                warn!(%id, error = %err, "loading building for edit failed");
                Some(EditorEvent::ShowError(LOAD_BUILDING_ERROR))
            }
        }
    }

    /// Replace the address and re-check it.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.state.form.address = address.into();
        self.state.errors.address = self.state.form.address_error();
    }

    /// Switch variant; both parking fields are re-checked.
    pub fn set_kind(&mut self, kind: BuildingKind) {
        self.state.form.kind = kind;
        self.state.errors.parking_spaces = self.state.form.parking_spaces_error();
        self.state.errors.monthly_rent = self.state.form.monthly_rent_error();
    }

    /// Replace the parking space count and re-check it.
    pub fn set_parking_spaces(&mut self, spaces: impl Into<String>) {
        self.state.form.parking_spaces = spaces.into();
        self.state.errors.parking_spaces = self.state.form.parking_spaces_error();
    }

    /// Replace the monthly rent and re-check it.
    pub fn set_monthly_rent(&mut self, rent: impl Into<String>) {
        self.state.form.monthly_rent = rent.into();
        self.state.errors.monthly_rent = self.state.form.monthly_rent_error();
    }

    /// Validate and store the building.
    ///
    /// Edit mode updates the existing building; otherwise a new building with
    /// a fresh id is added.
    pub async fn save(&mut self) -> EditorEvent {
        let id = self.state.id.clone().unwrap_or_else(BuildingId::random);
        let building = match self.state.form.to_building(id) {
            Ok(building) => building,
            Err(errors) => {
                self.state.errors = errors;
                return EditorEvent::ShowError(VALIDATION_ERRORS);
            }
        };
        self.state.errors = FormErrors::default();

        match self.store(&building).await {
            Ok(()) => {
                debug!(id = %building.id(), edit = self.state.edit_mode, "building saved");
                EditorEvent::SaveSuccess
            }
            Err(err) => {
                warn!(id = %building.id(), error = %err, "saving building failed");
                EditorEvent::ShowError(SAVE_BUILDING_ERROR)
            }
        }
    }

    async fn store(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        if self.state.edit_mode {
            self.use_cases.update.execute(building).await
        } else {
            self.use_cases.add.execute(building).await
        }
    }
}
