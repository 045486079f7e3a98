//! Background move requests with a single-slot mailbox.
//!
//! A request hands the collaborator an encoded position on a worker thread.
//! At most one request is outstanding; the answer comes back over a channel
//! tagged with the request's token and is only delivered if that request has
//! not been abandoned in the meantime.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::engines::engine_trait::{
    CollaboratorError, CollaboratorResult, SearchEngine, SearchOutput, SearchParams,
};

#[derive(Debug)]
pub struct SearchResponse {
    pub token: u64,
    /// Position the request was made for.
    pub fen: String,
    pub result: CollaboratorResult<SearchOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    token: u64,
    abandoned: bool,
}

/// What `poll` found in the mailbox.
#[derive(Debug)]
pub enum SearchPoll {
    /// Nothing outstanding, or the answer has not arrived yet.
    Pending,
    Ready(SearchResponse),
    /// An answer arrived for a request that was abandoned.
    Discarded { token: u64 },
}

pub struct SearchDispatcher {
    engine: Arc<Mutex<Box<dyn SearchEngine>>>,
    engine_name: String,
    tx: Sender<SearchResponse>,
    rx: Receiver<SearchResponse>,
    in_flight: Option<InFlight>,
    next_token: u64,
}

impl SearchDispatcher {
    pub fn new(engine: Box<dyn SearchEngine>) -> Self {
        let (tx, rx) = channel();
        let engine_name = engine.name().to_owned();
        Self {
            engine: Arc::new(Mutex::new(engine)),
            engine_name,
            tx,
            rx,
            in_flight: None,
            next_token: 1,
        }
    }

    #[inline]
    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a search for `fen`. Returns the request token, or `None` if a
    /// request is already outstanding.
    pub fn request(&mut self, fen: String, params: SearchParams) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }

        let token = self.next_token;
        self.next_token += 1;
        self.in_flight = Some(InFlight {
            token,
            abandoned: false,
        });

        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = match engine.lock() {
                Ok(mut engine) => engine.choose_move(&fen, &params),
                Err(_) => Err(CollaboratorError::Unavailable(
                    "search engine poisoned by an earlier panic".to_owned(),
                )),
            };
            // The receiver only disappears when the dispatcher is dropped.
            let _ = tx.send(SearchResponse { token, fen, result });
        });

        Some(token)
    }

    /// Mark the outstanding request as stale. Its answer will be discarded
    /// when it arrives; no new request can start until then.
    pub fn abandon(&mut self) {
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.abandoned = true;
        }
    }

    /// Tell the engine a new game started. Skipped while a search is running.
    pub fn new_game(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        if let Ok(mut engine) = self.engine.try_lock() {
            engine.new_game();
        }
    }

    /// Check the mailbox once; never blocks.
    pub fn poll(&mut self) -> SearchPoll {
        loop {
            let response = match self.rx.try_recv() {
                Ok(response) => response,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    return SearchPoll::Pending;
                }
            };

            match self.in_flight {
                Some(in_flight) if in_flight.token == response.token => {
                    self.in_flight = None;
                    if in_flight.abandoned {
                        return SearchPoll::Discarded {
                            token: response.token,
                        };
                    }
                    return SearchPoll::Ready(response);
                }
                // Tokens from requests that are no longer tracked.
                _ => continue,
            }
        }
    }
}
