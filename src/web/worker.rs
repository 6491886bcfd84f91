use super::{CancelToken, WebResolver};
use crate::{
    Database,
    domain::{Track, TrackId},
};
use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, info};

enum SearchCommand {
    Resolve {
        seq: u64,
        track: Arc<Track>,
        cancel: CancelToken,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Resolved { track_id: TrackId, uri: String },
    NotFound { track_id: TrackId },
}

impl SearchEvent {
    pub fn track_id(&self) -> TrackId {
        match self {
            SearchEvent::Resolved { track_id, .. } | SearchEvent::NotFound { track_id } => {
                *track_id
            }
        }
    }

    /// Persist a resolved uri for the track.
    pub fn apply(&self, db: &mut Database) -> Result<()> {
        if let SearchEvent::Resolved { track_id, uri } = self {
            db.set_track_uri(*track_id, uri)?;
        }
        Ok(())
    }
}

/// Resolves web uris on a background thread, one request at a time.
/// A new request cancels the one in flight and superseded results are
/// never handed out.
pub struct SearchWorker {
    sender: Sender<SearchCommand>,
    events: Receiver<(u64, SearchEvent)>,
    current: Option<CancelToken>,
    seq: u64,
    thread_handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(mut resolver: WebResolver) -> Self {
        let (sender, receiver) = unbounded::<SearchCommand>();
        let (event_sender, events) = unbounded();

        let thread_handle = thread::spawn(move || {
            debug!("Search worker started");

            for command in receiver {
                match command {
                    SearchCommand::Resolve { seq, track, cancel } => {
                        if cancel.is_cancelled() {
                            continue;
                        }

                        let event = match resolver.resolve(&track, &cancel) {
                            Some(uri) => SearchEvent::Resolved {
                                track_id: track.id,
                                uri,
                            },
                            None => SearchEvent::NotFound { track_id: track.id },
                        };

                        if cancel.is_cancelled() {
                            debug!(track = %track.title, "Search superseded");
                            continue;
                        }

                        if event_sender.send((seq, event)).is_err() {
                            break;
                        }
                    }
                    SearchCommand::Shutdown => break,
                }
            }

            debug!("Search worker stopped");
        });

        SearchWorker {
            sender,
            events,
            current: None,
            seq: 0,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn request(&mut self, track: Arc<Track>) -> Result<()> {
        self.cancel();
        self.seq += 1;

        let cancel = CancelToken::new();
        info!(track = %track.title, "Searching web uri");
        self.sender
            .send(SearchCommand::Resolve {
                seq: self.seq,
                track,
                cancel: cancel.clone(),
            })
            .map_err(|_| anyhow!("Search worker is gone"))?;

        self.current = Some(cancel);
        Ok(())
    }

    /// Cancel the request in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    pub fn try_recv(&self) -> Option<SearchEvent> {
        while let Ok((seq, event)) = self.events.try_recv() {
            if self.is_current(seq) {
                return Some(event);
            }
        }
        None
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchEvent> {
        loop {
            match self.events.recv_timeout(timeout) {
                Ok((seq, event)) if self.is_current(seq) => return Some(event),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Every pending result, for the control thread to apply.
    pub fn drain(&self) -> Vec<SearchEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn is_current(&self, seq: u64) -> bool {
        self.current.is_some() && seq == self.seq
    }

    fn stop(&mut self) -> Result<()> {
        self.cancel();
        let _ = self.sender.send(SearchCommand::Shutdown);

        if let Some(handle) = self.thread_handle.take() {
            handle
                .join()
                .map_err(|_| anyhow!("Search worker panicked"))?;
        }
        Ok(())
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
