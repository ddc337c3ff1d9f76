use std::sync::Mutex;
use std::thread;

use crate::model::AppId;

/// Outcome of one task in a broadcast run.
#[derive(Debug)]
pub struct TaskOutcome {
    pub app: AppId,
    /// `Err` carries a short diagnostic; one failing app never halts the
    /// others.
    pub result: std::result::Result<(), String>,
}

impl TaskOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run `job` for every app on a bounded pool of worker threads and collect
/// per-app outcomes, join-all semantics.
///
/// Workers pull app ids off a shared queue, so the pool never holds more
/// than `workers` tasks in flight. Outcomes are returned sorted by app id.
pub fn run_pool<F>(apps: Vec<AppId>, workers: usize, job: F) -> Vec<TaskOutcome>
where
    F: Fn(&AppId) -> std::result::Result<(), String> + Sync,
{
    if apps.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, apps.len());
    let queue = Mutex::new(apps.into_iter());
    let outcomes = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let next = queue.lock().expect("worker queue lock poisoned").next();
                let Some(app) = next else { break };
                let result = job(&app);
                outcomes
                    .lock()
                    .expect("outcome lock poisoned")
                    .push(TaskOutcome { app, result });
            });
        }
    });

    let mut outcomes = outcomes.into_inner().expect("outcome lock poisoned");
    outcomes.sort_by(|a, b| a.app.cmp(&b.app));
    outcomes
}
