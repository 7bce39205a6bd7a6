//! Application use cases over the building repository.
//!
//! Each use case is a thin delegator around a shared repository handle. The
//! only use case with logic of its own is [`ParseBuilding`], which turns free
//! text into a validated building.

use std::sync::Arc;

use crate::domain::ports::{BuildingFeed, BuildingRepository, BuildingRepositoryError};
use crate::domain::validation::{BuildingValidationError, parse_building};
use crate::domain::{Building, BuildingId};

/// Observe the full building collection.
#[derive(Debug)]
pub struct GetAllBuildings<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> GetAllBuildings<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Subscribe to the live collection.
    pub fn execute(&self) -> BuildingFeed {
        self.repository.list()
    }
}

/// Look up a single building.
#[derive(Debug)]
pub struct GetBuildingById<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> GetBuildingById<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch the building with `id`, if any.
    pub async fn execute(&self, id: &BuildingId) -> Result<Option<Building>, BuildingRepositoryError> {
        self.repository.get_by_id(id).await
    }
}

/// Store a new building, replacing any with the same id.
#[derive(Debug)]
pub struct AddBuilding<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> AddBuilding<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Upsert `building`.
    pub async fn execute(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        self.repository.add(building).await
    }
}

/// Replace an existing building.
#[derive(Debug)]
pub struct UpdateBuilding<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> UpdateBuilding<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Replace the building with the same id; no-op when none matches.
    pub async fn execute(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        self.repository.update(building).await
    }
}

/// Remove a building.
#[derive(Debug)]
pub struct DeleteBuilding<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> DeleteBuilding<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Delete the building with the same id; no-op when absent.
    pub async fn execute(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        self.repository.delete(building).await
    }
}

/// Find buildings by address fragment.
#[derive(Debug)]
pub struct SearchBuildingsByAddress<R> {
    repository: Arc<R>,
}

impl<R: BuildingRepository> SearchBuildingsByAddress<R> {
    /// Create the use case.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Buildings whose address contains `query`, ignoring case.
    pub async fn execute(&self, query: &str) -> Result<Vec<Building>, BuildingRepositoryError> {
        self.repository.search_by_address(query).await
    }
}

/// Turn free text into a validated building with a fresh id.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseBuilding;

impl ParseBuilding {
    /// Parse `<address>` or `<address>;<spaces>;<rent>`.
    pub fn execute(&self, input: &str) -> Result<Building, BuildingValidationError> {
        parse_building(input)
    }
}

/// Every building use case wired to one repository.
#[derive(Debug)]
pub struct BuildingUseCases<R> {
    pub get_all: GetAllBuildings<R>,
    pub get_by_id: GetBuildingById<R>,
    pub add: AddBuilding<R>,
    pub update: UpdateBuilding<R>,
    pub delete: DeleteBuilding<R>,
    pub search: SearchBuildingsByAddress<R>,
    pub parse: ParseBuilding,
}

impl<R: BuildingRepository> BuildingUseCases<R> {
    /// Wire every use case to `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            get_all: GetAllBuildings::new(Arc::clone(&repository)),
            get_by_id: GetBuildingById::new(Arc::clone(&repository)),
            add: AddBuilding::new(Arc::clone(&repository)),
            update: UpdateBuilding::new(Arc::clone(&repository)),
            delete: DeleteBuilding::new(Arc::clone(&repository)),
            search: SearchBuildingsByAddress::new(repository),
            parse: ParseBuilding,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Delegation checks against a mocked repository.
    use super::*;
    use crate::domain::Address;
    use crate::domain::ports::MockBuildingRepository;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn building() -> Building {
        Building::without_parking(
            BuildingId::new("b-1").expect("valid id"),
            Address::new("Тверская ул., 25").expect("valid address"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn get_by_id_delegates_and_passes_absence_through(building: Building) {
        let mut repo = MockBuildingRepository::new();
        let id = building.id().clone();
        repo.expect_get_by_id()
            .with(eq(id.clone()))
            .times(1)
            .returning(|_| Ok(None));

        let use_case = GetBuildingById::new(Arc::new(repo));
        let found = use_case.execute(&id).await.expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn add_update_delete_delegate_once(building: Building) {
        let mut repo = MockBuildingRepository::new();
        repo.expect_add()
            .with(eq(building.clone()))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_update()
            .with(eq(building.clone()))
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_delete()
            .with(eq(building.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let use_cases = BuildingUseCases::new(Arc::new(repo));
        use_cases.add.execute(&building).await.expect("add succeeds");
        use_cases
            .update
            .execute(&building)
            .await
            .expect("update succeeds");
        use_cases
            .delete
            .execute(&building)
            .await
            .expect("delete succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn search_forwards_query_and_errors(building: Building) {
        let mut repo = MockBuildingRepository::new();
        repo.expect_search_by_address()
            .with(eq("тверская"))
            .times(1)
            .returning(move |_| Ok(vec![building.clone()]));
        repo.expect_search_by_address()
            .with(eq("broken"))
            .times(1)
            .returning(|_| Err(BuildingRepositoryError::query("disk full")));

        let use_case = SearchBuildingsByAddress::new(Arc::new(repo));
        assert_eq!(
            use_case.execute("тверская").await.expect("search").len(),
            1
        );
        assert_eq!(
            use_case.execute("broken").await,
            Err(BuildingRepositoryError::query("disk full"))
        );
    }

    #[rstest]
    fn get_all_returns_the_repository_feed(building: Building) {
        let mut repo = MockBuildingRepository::new();
        repo.expect_list()
            .times(1)
            .returning(move || BuildingFeed::fixed(vec![building.clone()]));

        let mut feed = GetAllBuildings::new(Arc::new(repo)).execute();
        assert_eq!(feed.current().len(), 1);
    }

    #[rstest]
    fn parse_rejects_non_positive_spaces() {
        let err = ParseBuilding.execute("addr;-1;100").expect_err("invalid");
        assert_eq!(err.code(), "validation_parking_spaces_positive");
    }
}
