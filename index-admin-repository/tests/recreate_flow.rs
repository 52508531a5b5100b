//! Integration tests for the index admin service.
//!
//! These tests use the real `IndexAdminService` against a stateful fake
//! backend that models the server's asynchronous behavior: creations
//! build over several polls before turning READY, and drops keep the
//! index visible in the listing for a poll before it disappears.

use std::sync::{Arc, Mutex};

use mongodb::bson::{doc, Document};

use index_admin_repository::{
    IndexAdminError, IndexAdminService, IndexDescriptor, IndexPollConfig, IndexStatus,
    SearchIndexAdmin,
};

/// One index held by the fake backend.
struct FakeIndex {
    name: String,
    status: IndexStatus,
    definition: Document,
    /// Listing polls remaining before the pending transition applies
    /// (BUILDING -> READY, DELETING -> removed).
    polls_until_transition: u32,
}

struct FakeState {
    indexes: Vec<FakeIndex>,
    create_calls: usize,
    drop_calls: usize,
    list_calls: usize,
}

/// Fake search service backend.
///
/// Every `list_indexes` call returns a snapshot of the current state and
/// then advances pending transitions, so asynchronous effects become
/// visible one poll later — the behavior the service's polling loops
/// exist to absorb.
struct FakeSearchService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSearchService {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                indexes: Vec::new(),
                create_calls: 0,
                drop_calls: 0,
                list_calls: 0,
            })),
        }
    }

    fn seeded(name: &str, definition: Document) -> Self {
        let service = Self::new();
        service.state.lock().unwrap().indexes.push(FakeIndex {
            name: name.to_string(),
            status: IndexStatus::Ready,
            definition,
            polls_until_transition: 0,
        });
        service
    }

    fn handle(&self) -> Arc<Mutex<FakeState>> {
        Arc::clone(&self.state)
    }

    fn advance(indexes: &mut Vec<FakeIndex>) {
        let mut i = 0;
        while i < indexes.len() {
            let index = &mut indexes[i];
            match index.status {
                IndexStatus::Deleting => {
                    if index.polls_until_transition <= 1 {
                        indexes.remove(i);
                        continue;
                    }
                    index.polls_until_transition -= 1;
                }
                IndexStatus::Building => {
                    if index.polls_until_transition <= 1 {
                        index.status = IndexStatus::Ready;
                    } else {
                        index.polls_until_transition -= 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }
}

#[async_trait::async_trait]
impl SearchIndexAdmin for FakeSearchService {
    async fn create_index(
        &self,
        name: &str,
        definition: &Document,
    ) -> Result<(), IndexAdminError> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.indexes.iter().any(|index| index.name == name) {
            return Err(IndexAdminError::already_exists(name));
        }
        state.indexes.push(FakeIndex {
            name: name.to_string(),
            status: IndexStatus::Building,
            definition: definition.clone(),
            polls_until_transition: 2,
        });
        Ok(())
    }

    async fn drop_index(&self, name: &str) -> Result<(), IndexAdminError> {
        let mut state = self.state.lock().unwrap();
        state.drop_calls += 1;
        if let Some(index) = state.indexes.iter_mut().find(|index| index.name == name) {
            index.status = IndexStatus::Deleting;
            index.polls_until_transition = 1;
        }
        Ok(())
    }

    async fn list_indexes(&self) -> Result<Vec<IndexDescriptor>, IndexAdminError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        let snapshot = state
            .indexes
            .iter()
            .map(|index| IndexDescriptor {
                name: index.name.clone(),
                status: index.status.clone(),
                latest_definition: index.definition.clone(),
            })
            .collect();
        FakeSearchService::advance(&mut state.indexes);
        Ok(snapshot)
    }
}

fn old_definition() -> Document {
    doc! { "mappings": { "dynamic": false, "fields": { "title": { "type": "string" } } } }
}

fn new_definition() -> Document {
    doc! { "mappings": { "dynamic": true } }
}

#[tokio::test(start_paused = true)]
async fn test_fresh_index_is_created_and_becomes_ready() {
    let fake = FakeSearchService::new();
    let state = fake.handle();
    let service = IndexAdminService::with_config(
        Box::new(fake),
        IndexPollConfig::with_max_attempts(10),
    );

    service
        .ensure_index("products_search", &new_definition())
        .await
        .unwrap();

    let effective = service.wait_for_ready("products_search").await.unwrap();

    assert_eq!(effective, new_definition());

    let state = state.lock().unwrap();
    assert_eq!(state.create_calls, 1);
    assert_eq!(state.drop_calls, 0);
    // Two polls observe the build, the third sees READY.
    assert_eq!(state.list_calls, 3);
}

#[tokio::test(start_paused = true)]
async fn test_existing_index_is_replaced_and_becomes_ready() {
    let fake = FakeSearchService::seeded("products_search", old_definition());
    let state = fake.handle();
    let service = IndexAdminService::with_config(
        Box::new(fake),
        IndexPollConfig::with_max_attempts(10),
    );

    service
        .ensure_index("products_search", &new_definition())
        .await
        .unwrap();

    let effective = service.wait_for_ready("products_search").await.unwrap();

    assert_eq!(effective, new_definition());

    let state = state.lock().unwrap();
    // First create is rejected, the replacement create succeeds.
    assert_eq!(state.create_calls, 2);
    assert_eq!(state.drop_calls, 1);
    // Deletion: one poll sees DELETING, one confirms absence.
    // Build: two polls see BUILDING, one sees READY.
    assert_eq!(state.list_calls, 5);
    assert_eq!(state.indexes.len(), 1);
    assert_eq!(state.indexes[0].definition, new_definition());
}

#[tokio::test(start_paused = true)]
async fn test_replacement_survives_unrelated_indexes() {
    let fake = FakeSearchService::seeded("products_search", old_definition());
    fake.state.lock().unwrap().indexes.push(FakeIndex {
        name: "autocomplete".to_string(),
        status: IndexStatus::Ready,
        definition: doc! { "mappings": { "dynamic": true } },
        polls_until_transition: 0,
    });
    let state = fake.handle();
    let service = IndexAdminService::with_config(
        Box::new(fake),
        IndexPollConfig::with_max_attempts(10),
    );

    service
        .ensure_index("products_search", &new_definition())
        .await
        .unwrap();
    service.wait_for_ready("products_search").await.unwrap();

    let state = state.lock().unwrap();
    // The unrelated index is untouched by the replacement.
    assert!(state
        .indexes
        .iter()
        .any(|index| index.name == "autocomplete" && index.status == IndexStatus::Ready));
}
