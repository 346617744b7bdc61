// src/services/presence.rs
use std::{sync::Arc, time::Duration};

use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info};

use crate::{
    message::User,
    services::{chat_storage::ChatStorage, gateway::Gateway},
};

/// Periodically refreshes the list of active users.
///
/// The first fetch completes before `start` returns, then the list is
/// refreshed once per `period` until [`PresenceHandle::stop`] is called or the
/// handle is dropped.
pub struct PresencePoller;

impl PresencePoller {
    pub async fn start(gateway: Gateway, storage: ChatStorage, period: Duration) -> PresenceHandle {
        let initial = gateway.list_users().await.unwrap_or_default();
        let users = Arc::new(RwLock::new(initial));
        let shared = Arc::clone(&users);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let task = tokio::spawn(async move {
            loop {
                ticker.tick().await;
                // A failed fetch keeps whatever we had before.
                if let Some(fresh) = gateway.list_users().await {
                    debug!(count = fresh.len(), "presence refreshed");
                    *shared.write().await = fresh;
                }
            }
        });

        info!(?period, "presence poller started");
        PresenceHandle {
            users,
            storage,
            task: Some(task),
        }
    }
}

pub struct PresenceHandle {
    users: Arc<RwLock<Vec<User>>>,
    storage: ChatStorage,
    task: Option<JoinHandle<()>>,
}

impl PresenceHandle {
    /// Active users without the local one (first name match only).
    pub async fn users(&self) -> Vec<User> {
        let mut users = self.users.read().await.clone();
        let own_name = self.storage.get_user_name();
        if !own_name.is_empty() {
            if let Some(pos) = users.iter().position(|u| u.name == own_name) {
                users.remove(pos);
            }
        }
        users
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels the refresh and waits until the task is gone.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("presence poller stopped");
        }
    }
}

impl Drop for PresenceHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
