//! Walkthrough Scenario
//!
//! The scripted sequence of todo requests. Some steps are always awaited
//! before the next request is issued; the rest are only awaited in
//! sequential mode and are otherwise spawned and left to finish on their
//! own, which is where the ordering races show up.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tokio::task::{self, JoinSet};

use super::step_log::{StepEntry, StepLog};
use crate::domain::gateways::TodoApi;
use crate::domain::models::todo::{NewTodo, TodoId, TodoPatch, TodoQuery, TodoReplacement};
use crate::shared::errors::ClientError;

const CLEARING: &str = "--- clearing old todos ---";
const BEGINNING: &str = "--- beginning example ---";
const FETCH_OLD: &str = " 0 -> fetching old todos";
const STEP_1: &str = " 1 -> creating new todo";
const STEP_2: &str = " 2 -> reading new todo by id param (declaring method)";
const STEP_3: &str = " 3 -> reading new todo by id query  (default GET method)";
const STEP_4: &str = " 4 -> reading new todo todoText query (new%20todo)";
const STEP_5: &str = " 5 -> adding todo 2 for PUTing";
const STEP_6: &str = " 6 -> updating todo 2 with PUT";
const STEP_7: &str = " 7 -> adding todo 3 for PATCHing";
const STEP_8: &str = " 8 -> updating todo 3 with PATCH";
const RANDOM_BATCH: &str = "adding seven random todos";
const STEP_16: &str = " 16 -> deleting the 5th todo";
const STEP_17: &str = " 17 -> fetching all todos";
const STEP_18: &str = " 18 -> fetching all completed todos";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// How non-awaited steps are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Await every request before issuing the next
    Sequential,
    /// Fire read/update steps without awaiting them
    #[default]
    Concurrent,
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(format!(
                "unknown run mode '{other}' (expected sequential or concurrent)"
            )),
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Concurrent => f.write_str("concurrent"),
        }
    }
}

/// Outcome of a full run
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughReport {
    pub mode: RunMode,
    pub entries: Vec<StepEntry>,
    pub failures: usize,
}

impl WalkthroughReport {
    /// Index of the first transcript line with exactly this message
    #[must_use]
    pub fn position(&self, message: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.message == message)
    }
}

/// Spawned steps, with their labels so a task that dies can still be reported
#[derive(Default)]
struct FiredSteps {
    tasks: JoinSet<()>,
    labels: HashMap<task::Id, String>,
}

impl FiredSteps {
    fn spawn<F>(&mut self, label: String, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.tasks.spawn(task);
        self.labels.insert(handle.id(), label);
    }

    /// Wait for every spawned step so no response is lost
    async fn drain(&mut self, log: &StepLog) {
        while let Some(joined) = self.tasks.join_next_with_id().await {
            match joined {
                Ok((id, ())) => {
                    self.labels.remove(&id);
                }
                Err(err) => {
                    let label = self.labels.remove(&err.id()).unwrap_or_default();
                    tracing::error!(
                        step = %label.trim(),
                        error = %err,
                        "Fired step did not complete"
                    );
                    log.task_failed(&label, err);
                }
            }
        }
    }
}

/// Scripted walkthrough against a todo API
pub struct Walkthrough {
    api: Arc<dyn TodoApi>,
    mode: RunMode,
    random_todo_count: usize,
}

impl Walkthrough {
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, mode: RunMode) -> Self {
        Self {
            api,
            mode,
            random_todo_count: 7,
        }
    }

    #[must_use]
    pub fn with_random_todo_count(mut self, count: usize) -> Self {
        self.random_todo_count = count;
        self
    }

    /// Run every step; failures are logged and counted, never returned
    pub async fn run(&self) -> WalkthroughReport {
        tracing::info!(mode = %self.mode, "Starting walkthrough");

        let log = Arc::new(StepLog::start());
        let mut pending = FiredSteps::default();

        self.clear_old_todos(&log).await;

        log.note(BEGINNING);

        // the read steps below rely on this todo existing
        let first = self.api.create(NewTodo::new("new todo", false));
        self.awaited(&log, STEP_1, first).await;

        self.fire(&log, &mut pending, STEP_2, |api| async move {
            api.get(TodoId::new(1)).await
        })
        .await;

        self.fire(&log, &mut pending, STEP_3, |api| async move {
            api.query(TodoQuery::by_id(TodoId::new(1))).await
        })
        .await;

        self.fire(&log, &mut pending, STEP_4, |api| async move {
            api.query(TodoQuery::by_text("new todo")).await
        })
        .await;

        let second = self.api.create(NewTodo::new("second todo", false));
        self.awaited(&log, STEP_5, second).await;

        self.fire(&log, &mut pending, STEP_6, |api| async move {
            let body = TodoReplacement {
                completed: Some(true),
                ..TodoReplacement::default()
            };
            api.replace(TodoId::new(2), body).await
        })
        .await;

        let third = self.api.create(NewTodo::new("third todo", false));
        self.awaited(&log, STEP_7, third).await;

        self.fire(&log, &mut pending, STEP_8, |api| async move {
            let body = TodoPatch {
                completed: Some(true),
                ..TodoPatch::default()
            };
            api.patch(TodoId::new(3), body).await
        })
        .await;

        self.add_random_todos(&log).await;

        self.fire(&log, &mut pending, STEP_16, |api| async move {
            api.delete(TodoId::new(5)).await
        })
        .await;

        self.fire(&log, &mut pending, STEP_17, |api| async move {
            api.query(TodoQuery::by_completed(true)).await
        })
        .await;

        self.fire(&log, &mut pending, STEP_18, |api| async move {
            api.query(TodoQuery::by_completed(true)).await
        })
        .await;

        pending.drain(&log).await;

        let report = WalkthroughReport {
            mode: self.mode,
            entries: log.entries(),
            failures: log.failures(),
        };
        tracing::info!(mode = %self.mode, failures = report.failures, "Walkthrough finished");
        report
    }

    /// Delete everything left over from earlier runs, one request at a time
    async fn clear_old_todos(&self, log: &StepLog) {
        log.note(CLEARING);

        let old_todos = self
            .awaited(log, FETCH_OLD, self.api.list())
            .await
            .unwrap_or_default();

        for todo in old_todos {
            let label = format!(" 0.{id} -> deleting old todo {id}", id = todo.id);
            self.awaited(log, &label, self.api.delete(todo.id)).await;
        }
    }

    /// Post the random batch; the batch itself is always joined before moving on
    async fn add_random_todos(&self, log: &Arc<StepLog>) {
        log.note(format!("{RANDOM_BATCH}, awaiting ..."));

        let mut batch = FiredSteps::default();
        for i in 1..=self.random_todo_count {
            let label = format!(" {} -> new random todo {}", i + 8, i + 3);
            let todo = random_todo();
            self.fire(log, &mut batch, &label, |api| async move {
                api.create(todo).await
            })
            .await;
        }
        batch.drain(log).await;

        log.note(format!("... {RANDOM_BATCH}"));
    }

    async fn awaited<T, Fut>(&self, log: &StepLog, label: &str, call: Fut) -> Option<T>
    where
        T: Serialize,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        log.request(label, true);
        let result = call.await;
        log.response(label, &result);
        result.ok()
    }

    async fn fire<T, F, Fut>(
        &self,
        log: &Arc<StepLog>,
        pending: &mut FiredSteps,
        label: &str,
        call: F,
    ) where
        T: Serialize + Send + 'static,
        F: FnOnce(Arc<dyn TodoApi>) -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        log.request(label, false);

        let call = call(Arc::clone(&self.api));
        let task = {
            let log = Arc::clone(log);
            let label = label.to_string();
            async move {
                let result = call.await;
                log.response(&label, &result);
            }
        };

        match self.mode {
            RunMode::Sequential => task.await,
            RunMode::Concurrent => pending.spawn(label.to_string(), task),
        }
    }
}

/// A todo with a coin-flip completion flag and a short base-36 text
fn random_todo() -> NewTodo {
    let mut rng = rand::thread_rng();
    let completed = rng.gen_bool(0.5);
    let len = rng.gen_range(3..=5);
    let todo_text: String = (0..len)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();
    NewTodo::new(todo_text, completed)
}
