pub mod notification_hub;
pub mod ready_watcher;

pub use notification_hub::{NotificationHub, Subscription};
pub use ready_watcher::DocumentReadyWatcher;
