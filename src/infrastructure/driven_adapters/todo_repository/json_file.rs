//! JSON File Todo Repository Implementation
//!
//! Implements the TodoRepository trait on top of a single JSON document
//! (`{ "todos": [...] }`) that is rewritten after every mutation, so the file
//! can be watched while a walkthrough runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::gateways::TodoRepository;
use crate::domain::models::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
use crate::shared::errors::{DomainError, RepositoryError};

/// On-disk representation of the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(default)]
    todos: Vec<Todo>,
}

impl TodoDocument {
    fn next_id(&self) -> Result<TodoId, DomainError> {
        match self.todos.iter().map(|todo| todo.id).max() {
            None => Ok(TodoId::new(1)),
            Some(max) => max.next().ok_or(DomainError::IdOverflow(max.value())),
        }
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

/// JSON-file implementation of TodoRepository
pub struct JsonFileTodoRepository {
    path: PathBuf,
    document: Mutex<TodoDocument>,
}

impl JsonFileTodoRepository {
    /// Open the store at `path`, creating an empty one if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the file is not a valid store.
    /// Returns `RepositoryError::Io` if the file cannot be read or created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();

        let document = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => TodoDocument::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let document = TodoDocument::default();
                persist(&path, &document).await?;
                document
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(path = %path.display(), count = document.todos.len(), "Todo store opened");

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `change` on a copy of the document and commit it once it is on disk
    ///
    /// A `None` from `change` means nothing matched; the store is left untouched.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut TodoDocument) -> Result<Option<T>, RepositoryError>,
    ) -> Result<Option<T>, RepositoryError> {
        let mut document = self.document.lock().await;
        let mut next = document.clone();
        let Some(result) = change(&mut next)? else {
            return Ok(None);
        };
        self.commit(&mut document, next).await?;
        Ok(Some(result))
    }

    /// Persist `next` and make it the current document
    async fn commit(
        &self,
        current: &mut TodoDocument,
        next: TodoDocument,
    ) -> Result<(), RepositoryError> {
        persist(&self.path, &next).await?;
        *current = next;
        Ok(())
    }
}

/// Write the document next to its destination, then move it into place
async fn persist(path: &Path, document: &TodoDocument) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(document)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    tracing::debug!(path = %path.display(), count = document.todos.len(), "Todo store persisted");
    Ok(())
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        Ok(self.document.lock().await.todos.clone())
    }

    async fn find_matching(&self, query: &TodoQuery) -> Result<Vec<Todo>, RepositoryError> {
        let document = self.document.lock().await;
        Ok(document
            .todos
            .iter()
            .filter(|todo| todo.matches(query))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        let document = self.document.lock().await;
        Ok(document.todos.iter().find(|todo| todo.id == id).cloned())
    }

    async fn create(&self, data: NewTodo) -> Result<Todo, RepositoryError> {
        let mut document = self.document.lock().await;
        let mut next = document.clone();

        let todo = Todo::new(next.next_id()?, data);
        next.todos.push(todo.clone());

        self.commit(&mut document, next).await?;
        Ok(todo)
    }

    async fn replace(
        &self,
        id: TodoId,
        data: TodoReplacement,
    ) -> Result<Option<Todo>, RepositoryError> {
        self.mutate(|document| {
            Ok(document.position(id).map(|index| {
                let replaced = document.todos[index].clone().replaced_with(data);
                document.todos[index] = replaced.clone();
                replaced
            }))
        })
        .await
    }

    async fn patch(
        &self,
        id: TodoId,
        data: TodoPatch,
    ) -> Result<Option<Todo>, RepositoryError> {
        self.mutate(|document| {
            Ok(document.position(id).map(|index| {
                let patched = document.todos[index].clone().patched_with(data);
                document.todos[index] = patched.clone();
                patched
            }))
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> Result<bool, RepositoryError> {
        let removed = self
            .mutate(|document| {
                Ok(document
                    .position(id)
                    .map(|index| document.todos.remove(index)))
            })
            .await?;
        Ok(removed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_temp() -> (tempfile::TempDir, JsonFileTodoRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileTodoRepository::open(dir.path().join("db.json"))
            .await
            .unwrap();
        (dir, repo)
    }

    async fn read_file(repo: &JsonFileTodoRepository) -> serde_json::Value {
        let bytes = tokio::fs::read(repo.path()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_create_missing_file_with_empty_collection() {
        let (_dir, repo) = open_temp().await;

        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(read_file(&repo).await, serde_json::json!({ "todos": [] }));
    }

    #[tokio::test]
    async fn should_assign_sequential_ids_and_persist() {
        let (_dir, repo) = open_temp().await;

        let first = repo.create(NewTodo::new("new todo", false)).await.unwrap();
        let second = repo.create(NewTodo::new("second todo", true)).await.unwrap();

        assert_eq!(first.id, TodoId::new(1));
        assert_eq!(second.id, TodoId::new(2));

        let on_disk = read_file(&repo).await;
        assert_eq!(on_disk["todos"][1]["todoText"], "second todo");
        assert_eq!(on_disk["todos"][1]["completed"], true);
    }

    #[tokio::test]
    async fn should_restart_ids_after_collection_is_emptied() {
        let (_dir, repo) = open_temp().await;

        let first = repo.create(NewTodo::new("a", false)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let again = repo.create(NewTodo::new("b", false)).await.unwrap();
        assert_eq!(again.id, TodoId::new(1));
    }

    #[tokio::test]
    async fn should_use_max_id_plus_one_after_a_gap() {
        let (_dir, repo) = open_temp().await;

        for text in ["a", "b", "c"] {
            repo.create(NewTodo::new(text, false)).await.unwrap();
        }
        repo.delete(TodoId::new(2)).await.unwrap();

        let next = repo.create(NewTodo::new("d", false)).await.unwrap();
        assert_eq!(next.id, TodoId::new(4));
    }

    #[tokio::test]
    async fn should_fail_create_on_id_overflow_without_touching_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let seeded = serde_json::json!({
            "todos": [{ "id": u64::MAX, "todoText": "last", "completed": false }]
        });
        tokio::fs::write(&path, serde_json::to_vec(&seeded).unwrap())
            .await
            .unwrap();
        let repo = JsonFileTodoRepository::open(&path).await.unwrap();

        let result = repo.create(NewTodo::new("one more", false)).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Domain(DomainError::IdOverflow(max))) if max == u64::MAX
        ));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert_eq!(read_file(&repo).await, seeded);
    }

    #[tokio::test]
    async fn should_reload_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        {
            let repo = JsonFileTodoRepository::open(&path).await.unwrap();
            repo.create(NewTodo::new("kept", true)).await.unwrap();
        }

        let reopened = JsonFileTodoRepository::open(&path).await.unwrap();
        let todos = reopened.find_all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].todo_text, "kept");
    }

    #[tokio::test]
    async fn should_reject_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let result = JsonFileTodoRepository::open(&path).await;
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    #[tokio::test]
    async fn should_replace_patch_and_report_unknown_ids() {
        let (_dir, repo) = open_temp().await;
        let todo = repo.create(NewTodo::new("third todo", false)).await.unwrap();

        let patched = repo
            .patch(todo.id, TodoPatch { completed: Some(true), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.todo_text, "third todo");
        assert!(patched.completed);

        let replaced = repo
            .replace(todo.id, TodoReplacement { completed: Some(false), ..Default::default() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.todo_text, "");

        let missing = TodoId::new(99);
        assert!(repo.patch(missing, TodoPatch::default()).await.unwrap().is_none());
        assert!(repo.replace(missing, TodoReplacement::default()).await.unwrap().is_none());
        assert!(!repo.delete(missing).await.unwrap());
    }

    #[tokio::test]
    async fn should_filter_by_query() {
        let (_dir, repo) = open_temp().await;
        repo.create(NewTodo::new("new todo", false)).await.unwrap();
        repo.create(NewTodo::new("done", true)).await.unwrap();

        let completed = repo.find_matching(&TodoQuery::by_completed(true)).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].todo_text, "done");

        let by_text = repo.find_matching(&TodoQuery::by_text("new todo")).await.unwrap();
        assert_eq!(by_text[0].id, TodoId::new(1));
    }
}
