//! Debounced background push
//!
//! Local changes schedule a push; the push only happens once no new change has
//! arrived for the debounce delay. A newer snapshot always replaces the pending
//! one. Failed pushes are logged and dropped: local state stays authoritative,
//! there is no retry and no rollback.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::Year;

use super::cloud::SyncClient;

enum Message {
    Schedule(Year),
    Flush(mpsc::Sender<()>),
}

/// Handle to the background sync worker
pub struct DebouncedSync {
    sender: Option<mpsc::Sender<Message>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl DebouncedSync {
    /// Start a worker that pushes through `client` after `delay` of quiet
    pub fn new(client: SyncClient, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || run_worker(client, receiver, delay));

        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Schedule a push of `year`, cancelling and replacing any pending one
    pub fn schedule(&self, year: Year) {
        if let Some(sender) = &self.sender {
            if sender.send(Message::Schedule(year)).is_err() {
                warn!("sync worker has stopped, change not scheduled");
            }
        }
    }

    /// Push any pending snapshot now and wait for the attempt to finish
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if sender.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for DebouncedSync {
    fn drop(&mut self) {
        // Closing the channel makes the worker push what is pending and exit
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("sync worker panicked");
            }
        }
    }
}

fn run_worker(client: SyncClient, receiver: mpsc::Receiver<Message>, delay: Duration) {
    let mut pending: Option<Year> = None;

    loop {
        let message = if pending.is_some() {
            match receiver.recv_timeout(delay) {
                Ok(message) => Some(message),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    push(&client, pending.take());
                    return;
                }
            }
        } else {
            match receiver.recv() {
                Ok(message) => Some(message),
                Err(_) => return,
            }
        };

        match message {
            Some(Message::Schedule(year)) => {
                if pending.replace(year).is_some() {
                    debug!("pending sync rescheduled");
                }
            }
            Some(Message::Flush(ack)) => {
                push(&client, pending.take());
                let _ = ack.send(());
            }
            None => push(&client, pending.take()),
        }
    }
}

fn push(client: &SyncClient, year: Option<Year>) {
    let Some(year) = year else {
        return;
    };
    match client.push(&year) {
        Ok(()) => info!(year = year.year, "synced to cloud"),
        Err(e) => warn!(year = year.year, error = %e, "cloud sync failed, keeping local data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EnvelopeError, EnvelopeResult};
    use crate::models::Money;
    use crate::sync::{CloudSync, Session};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[derive(Default)]
    struct RecordingCloud {
        pushed: Mutex<Vec<Year>>,
        fail: bool,
    }

    impl CloudSync for RecordingCloud {
        fn pull(&self, _identifier: &str, _year: i32) -> EnvelopeResult<Option<Year>> {
            Ok(None)
        }

        fn push(&self, _identifier: &str, year: &Year) -> EnvelopeResult<()> {
            if self.fail {
                return Err(EnvelopeError::Sync("offline".into()));
            }
            self.pushed.lock().unwrap().push(year.clone());
            Ok(())
        }
    }

    fn year_with_budget(dollars: i64) -> Year {
        let mut year = Year::new(2025);
        year.months[0].total_budget = Money::from_dollars(dollars);
        year
    }

    fn start(cloud: Arc<RecordingCloud>, delay: Duration) -> DebouncedSync {
        let client = SyncClient::new(cloud, Session::authenticated("sam"));
        DebouncedSync::new(client, delay)
    }

    #[test]
    fn test_burst_of_changes_pushes_latest_once() {
        let cloud = Arc::new(RecordingCloud::default());
        let sync = start(cloud.clone(), Duration::from_secs(60));

        sync.schedule(year_with_budget(1));
        sync.schedule(year_with_budget(2));
        sync.schedule(year_with_budget(3));
        sync.flush();

        let pushed = cloud.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0], year_with_budget(3));
    }

    #[test]
    fn test_push_fires_after_quiet_period() {
        let cloud = Arc::new(RecordingCloud::default());
        let sync = start(cloud.clone(), Duration::from_millis(20));

        sync.schedule(year_with_budget(7));

        let deadline = Instant::now() + Duration::from_secs(10);
        while cloud.pushed.lock().unwrap().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(cloud.pushed.lock().unwrap().len(), 1);
        drop(sync);
        assert_eq!(cloud.pushed.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_drop_pushes_pending() {
        let cloud = Arc::new(RecordingCloud::default());
        let sync = start(cloud.clone(), Duration::from_secs(60));

        sync.schedule(year_with_budget(5));
        drop(sync);

        assert_eq!(cloud.pushed.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_flush_without_pending_does_nothing() {
        let cloud = Arc::new(RecordingCloud::default());
        let sync = start(cloud.clone(), Duration::from_secs(60));

        sync.flush();
        assert!(cloud.pushed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_push_is_swallowed() {
        let cloud = Arc::new(RecordingCloud {
            fail: true,
            ..Default::default()
        });
        let sync = start(cloud.clone(), Duration::from_secs(60));

        sync.schedule(year_with_budget(1));
        sync.flush();
        sync.schedule(year_with_budget(2));
        sync.flush();

        assert!(cloud.pushed.lock().unwrap().is_empty());
    }
}
