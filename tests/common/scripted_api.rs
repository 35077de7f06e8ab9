//! In-process `SupervisorApi` with scripted status answers.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use scrape_console::client::{Ack, Command, CommandReply, SupervisorApi, TransportError};
use scrape_console::status::StatusSnapshot;

pub enum Scripted {
    Snapshot {
        snapshot: StatusSnapshot,
        delay: Duration,
    },
    Failure,
}

impl Scripted {
    pub fn now(snapshot: StatusSnapshot) -> Self {
        Scripted::Snapshot {
            snapshot,
            delay: Duration::ZERO,
        }
    }

    pub fn after(delay: Duration, snapshot: StatusSnapshot) -> Self {
        Scripted::Snapshot { snapshot, delay }
    }
}

/// Answers status polls from a script, then with `fallback` once the
/// script runs out. Every command is acknowledged.
pub struct ScriptedApi {
    script: Mutex<VecDeque<Scripted>>,
    fallback: StatusSnapshot,
    status_calls: AtomicUsize,
    commands: Mutex<Vec<Command>>,
}

impl ScriptedApi {
    pub fn new(fallback: StatusSnapshot) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            status_calls: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, step: Scripted) {
        self.script.lock().push_back(step);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }
}

#[async_trait]
impl SupervisorApi for ScriptedApi {
    async fn status(&self) -> Result<StatusSnapshot, TransportError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().pop_front();
        match step {
            Some(Scripted::Snapshot { snapshot, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(snapshot)
            }
            Some(Scripted::Failure) => Err(TransportError::Status {
                path: "/scraper/status".to_string(),
                status: 500,
            }),
            None => Ok(self.fallback.clone()),
        }
    }

    async fn send(&self, command: Command) -> Result<CommandReply, TransportError> {
        self.commands.lock().push(command);
        Ok(CommandReply {
            status: 200,
            ack: Some(Ack::ok()),
        })
    }
}
