use schoolmis_db::{Collection, DocumentStore, MemoryStore, StoreSource};
use schoolmis_models::system::StatsResponse;
use tracing::{info, instrument, warn};

pub struct StatsService;

impl StatsService {
    /// Student and school counts from the active store. A failed count is
    /// answered from memory rather than surfaced as an error.
    #[instrument(skip(store, memory))]
    pub async fn counts(store: &dyn DocumentStore, memory: &MemoryStore) -> StatsResponse {
        let source = store.source();
        let counted = tokio::try_join!(
            store.count(Collection::Students),
            store.count(Collection::Schools)
        );

        match counted {
            Ok((students, schools)) => {
                info!(students, schools, source = %source, "Stats computed");
                StatsResponse {
                    students,
                    schools,
                    source: source.to_string(),
                    mongo_status: Some(
                        match source {
                            StoreSource::Mongodb => "connected",
                            StoreSource::Memory => "disconnected",
                        }
                        .to_string(),
                    ),
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Counting failed, answering from memory");
                StatsResponse {
                    students: memory.len(Collection::Students) as u64,
                    schools: memory.len(Collection::Schools) as u64,
                    source: "memory-fallback".to_string(),
                    mongo_status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
