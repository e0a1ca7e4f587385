use std::sync::Arc;

use tokio::sync::Mutex;

use super::{ProjectSession, ProjectStore, StoreError, StoreResult};
use crate::models::{Project, ProjectCreate};

#[derive(Debug)]
struct Records {
    next_id: i64,
    projects: Vec<Project>,
}

/// Process-local store. Everything is lost when the process exits.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Records {
                next_id: 1,
                projects: Vec::new(),
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MemorySession {
    records: Arc<Mutex<Records>>,
}

impl ProjectStore for MemoryStore {
    type Session = MemorySession;

    async fn open_session(&self) -> StoreResult<MemorySession> {
        Ok(MemorySession {
            records: Arc::clone(&self.records),
        })
    }
}

impl ProjectSession for MemorySession {
    async fn create(&mut self, input: ProjectCreate) -> StoreResult<Project> {
        // id assignment and append happen under the same lock
        let mut records = self.records.lock().await;
        let id = records.next_id;
        records.next_id = id.checked_add(1).ok_or(StoreError::IdentityExhausted)?;

        let project = Project::from_create(id, input);
        records.projects.push(project.clone());

        Ok(project)
    }

    async fn list(&mut self) -> StoreResult<Vec<Project>> {
        let records = self.records.lock().await;
        Ok(records.projects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProjectCreate {
        ProjectCreate {
            name: name.to_string(),
            owner: "Ana Ruiz".to_string(),
            location: "Madrid".to_string(),
            sector: "Energy".to_string(),
            email: "ana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = MemoryStore::new();
        let mut session = store.open_session().await.unwrap();
        assert!(session.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = MemoryStore::new();
        let mut session = store.open_session().await.unwrap();

        let first = session.create(input("Solar Grid")).await.unwrap();
        let second = session.create(input("Wind Farm")).await.unwrap();
        assert_ne!(first.id, second.id);

        let listed = session.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(session.list().await.unwrap(), listed);
    }

    #[tokio::test]
    async fn test_sessions_share_records() {
        let store = MemoryStore::new();
        let created = {
            let mut session = store.open_session().await.unwrap();
            session.create(input("Solar Grid")).await.unwrap()
        };

        let mut other = store.open_session().await.unwrap();
        assert_eq!(other.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_new_store_starts_empty() {
        let store = MemoryStore::new();
        let mut session = store.open_session().await.unwrap();
        session.create(input("Solar Grid")).await.unwrap();

        let restarted = MemoryStore::new();
        let mut session = restarted.open_session().await.unwrap();
        assert!(session.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut session = store.open_session().await.unwrap();
                session.create(input(&format!("project {i}"))).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
