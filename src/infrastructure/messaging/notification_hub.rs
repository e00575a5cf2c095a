use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use crate::application::ports::{Notifier, ServerEvent};

/// Per-user broadcast rooms. Every open WebSocket or SSE stream of a user holds
/// a [`Subscription`] on that user's room.
pub struct NotificationHub {
    rooms: RwLock<HashMap<Uuid, broadcast::Sender<ServerEvent>>>,
    capacity: usize,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Joins the user's room, creating it on first use. The room is dropped
    /// when its last subscription goes away.
    pub fn subscribe(self: &Arc<Self>, user_id: Uuid) -> Subscription {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let receiver = rooms
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();

        Subscription {
            user_id,
            receiver: Some(receiver),
            hub: Arc::clone(self),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn subscriber_count(&self, user_id: Uuid) -> usize {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    fn drop_room_if_empty(&self, user_id: Uuid) {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        if rooms
            .get(&user_id)
            .is_some_and(|tx| tx.receiver_count() == 0)
        {
            rooms.remove(&user_id);
            tracing::debug!(%user_id, "Dropped empty notification room");
        }
    }
}

#[async_trait]
impl Notifier for NotificationHub {
    async fn publish(&self, user_id: Uuid, event: ServerEvent) -> usize {
        let sender = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned();
        let Some(sender) = sender else {
            return 0;
        };

        match sender.send(event) {
            Ok(delivered) => delivered,
            Err(_) => {
                self.drop_room_if_empty(user_id);
                0
            }
        }
    }
}

/// One connection's membership in a user room.
pub struct Subscription {
    user_id: Uuid,
    receiver: Option<broadcast::Receiver<ServerEvent>>,
    hub: Arc<NotificationHub>,
}

impl Subscription {
    pub async fn recv(&mut self) -> Result<ServerEvent, RecvError> {
        match self.receiver.as_mut() {
            Some(receiver) => receiver.recv().await,
            None => Err(RecvError::Closed),
        }
    }

    pub fn try_recv(&mut self) -> Result<ServerEvent, broadcast::error::TryRecvError> {
        match self.receiver.as_mut() {
            Some(receiver) => receiver.try_recv(),
            None => Err(broadcast::error::TryRecvError::Closed),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The receiver must be gone before the room is checked for listeners.
        drop(self.receiver.take());
        self.hub.drop_room_if_empty(self.user_id);
    }
}
