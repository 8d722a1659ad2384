mod notification;

pub use notification::NotificationEvent;
