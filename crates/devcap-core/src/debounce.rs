//! Trailing-edge debouncing on a background thread.
//!
//! Each [`Debouncer`] owns its own timer thread, so independent inputs never
//! share or reset each other's pending calls.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Wrapped callback returned by [`debounce`].
///
/// Every [`call`](Debouncer::call) restarts the quiet period. The callback
/// runs once the wait elapses with no further calls, receiving the arguments
/// of the last call. There is no maximum wait: a caller that never pauses
/// never triggers the callback. Dropping the debouncer discards a pending
/// call.
pub struct Debouncer<T> {
    tx: Sender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || run_timer(rx, wait, callback));
        Self { tx }
    }

    /// Schedule the callback with `args`, superseding any pending call.
    pub fn call(&self, args: T) {
        // The timer thread only exits once this sender is gone.
        let _ = self.tx.send(args);
    }
}

/// Wrap `callback` so it only fires after `wait` of inactivity.
pub fn debounce<T, F>(callback: F, wait: Duration) -> Debouncer<T>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    Debouncer::new(wait, callback)
}

fn run_timer<T, F: FnMut(T)>(rx: Receiver<T>, wait: Duration, mut callback: F) {
    while let Ok(mut pending) = rx.recv() {
        loop {
            match rx.recv_timeout(wait) {
                Ok(next) => pending = next,
                Err(RecvTimeoutError::Timeout) => {
                    callback(pending);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    type Fired = Arc<Mutex<Vec<(u32, Duration)>>>;

    fn recording(start: Instant) -> (Fired, impl FnMut(u32) + Send + 'static) {
        let fired: Fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let callback = move |value: u32| sink.lock().unwrap().push((value, start.elapsed()));
        (fired, callback)
    }

    #[test]
    fn test_burst_fires_once_with_last_args() {
        let start = Instant::now();
        let (fired, callback) = recording(start);
        let debounced = debounce(callback, Duration::from_millis(300));

        debounced.call(0);
        thread::sleep(Duration::from_millis(50));
        debounced.call(50);
        thread::sleep(Duration::from_millis(50));
        debounced.call(100);

        thread::sleep(Duration::from_millis(650));
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        let (value, at) = fired[0];
        assert_eq!(value, 100);
        assert!(at >= Duration::from_millis(400), "fired too early: {at:?}");
        assert!(at < Duration::from_millis(700), "fired too late: {at:?}");
    }

    #[test]
    fn test_separate_bursts_fire_separately() {
        let start = Instant::now();
        let (fired, callback) = recording(start);
        let debounced = debounce(callback, Duration::from_millis(50));

        debounced.call(1);
        thread::sleep(Duration::from_millis(200));
        debounced.call(2);
        thread::sleep(Duration::from_millis(200));

        let values: Vec<_> = fired.lock().unwrap().iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_independent_debouncers_do_not_interfere() {
        let start = Instant::now();
        let (fired_a, callback_a) = recording(start);
        let (fired_b, callback_b) = recording(start);
        let a = debounce(callback_a, Duration::from_millis(60));
        let b = debounce(callback_b, Duration::from_millis(60));

        a.call(1);
        for i in 0..5 {
            b.call(10 + i);
            thread::sleep(Duration::from_millis(20));
        }
        thread::sleep(Duration::from_millis(250));

        assert_eq!(fired_a.lock().unwrap().len(), 1);
        let b_values: Vec<_> = fired_b.lock().unwrap().iter().map(|(v, _)| *v).collect();
        assert_eq!(b_values, vec![14]);
    }

    #[test]
    fn test_drop_discards_pending_call() {
        let start = Instant::now();
        let (fired, callback) = recording(start);
        let debounced = debounce(callback, Duration::from_millis(100));

        debounced.call(7);
        drop(debounced);
        thread::sleep(Duration::from_millis(250));

        assert!(fired.lock().unwrap().is_empty());
    }
}
