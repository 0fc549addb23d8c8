//! Fakes and environment scaffolding shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::executor::{CommandOutput, CommandRunner};

enum Scripted {
    Ok(CommandOutput),
    Err(String),
}

/// Command runner that replays scripted outcomes in order and records
/// every invocation. Panics when a test under-scripts it, so attempt
/// counts stay exact.
#[derive(Clone)]
pub(crate) struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

struct FakeRunnerState {
    outcomes: VecDeque<Scripted>,
    calls: Vec<(String, Vec<String>)>,
    quiet_at_call: Vec<bool>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRunnerState {
                outcomes: VecDeque::new(),
                calls: Vec::new(),
                quiet_at_call: Vec::new(),
            })),
        }
    }

    pub(crate) fn push_ok(&self, output: CommandOutput) {
        self.inner.lock().unwrap().outcomes.push_back(Scripted::Ok(output));
    }

    pub(crate) fn push_err(&self, reason: &str) {
        self.inner
            .lock()
            .unwrap()
            .outcomes
            .push_back(Scripted::Err(reason.to_string()));
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Whether attempt diagnostics were suppressed at each recorded
    /// invocation.
    pub(crate) fn quiet_at_call(&self) -> Vec<bool> {
        self.inner.lock().unwrap().quiet_at_call.clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push((program.to_string(), args.to_vec()));
        state.quiet_at_call.push(crate::quiet::attempts_quiet());
        match state.outcomes.pop_front() {
            Some(Scripted::Ok(out)) => Ok(out),
            Some(Scripted::Err(reason)) => Err(anyhow!("{reason}")),
            None => panic!("FakeRunner ran out of scripted outcomes"),
        }
    }
}

// Tests that touch LOGNAME serialize on this lock; cargo runs tests on
// multiple threads and the environment is process-wide.
static LOGNAME_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) struct LognameGuard {
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for LognameGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var("LOGNAME", v),
            None => std::env::remove_var("LOGNAME"),
        }
    }
}

pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    LOGNAME_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn logname_guard(user: &str) -> LognameGuard {
    let lock = lock_env();
    let previous = std::env::var("LOGNAME").ok();
    std::env::set_var("LOGNAME", user);
    LognameGuard {
        previous,
        _lock: lock,
    }
}

pub(crate) fn logname_guard_unset() -> LognameGuard {
    let lock = lock_env();
    let previous = std::env::var("LOGNAME").ok();
    std::env::remove_var("LOGNAME");
    LognameGuard {
        previous,
        _lock: lock,
    }
}
