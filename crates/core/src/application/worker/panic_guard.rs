// Panic isolation for worker safety
//
// A job runs in its own tokio task; if it panics, the worker receives the
// payload through `JoinError::into_panic` and keeps going.
use std::any::Any;

/// Turn a panic payload into a readable message
pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
