//! Fire-and-forget commentary requests.
//!
//! A single worker thread owns the collaborator and takes requests off an
//! `mpsc` queue, so answers come back in the order requests were issued.
//! Each answer is reported through the callback supplied with its request.

use std::sync::mpsc::{channel, Sender};
use std::thread;

use crate::engines::engine_trait::{CollaboratorResult, CommentaryEngine, CommentaryRequest};

type Callback = Box<dyn FnOnce(CollaboratorResult<String>) + Send>;

struct Job {
    request: CommentaryRequest,
    on_done: Callback,
}

pub struct CommentaryDispatcher {
    jobs: Sender<Job>,
}

impl CommentaryDispatcher {
    /// Start the worker. It exits once the dispatcher is dropped and the
    /// queue has drained.
    pub fn new(mut engine: Box<dyn CommentaryEngine>) -> Self {
        let (jobs, queue) = channel::<Job>();
        thread::spawn(move || {
            for job in queue {
                let result = engine.comment(&job.request);
                (job.on_done)(result);
            }
        });
        Self { jobs }
    }

    /// Queue a request. Returns `false` if the worker is gone, in which case
    /// `on_done` is never called.
    pub fn request<F>(&self, request: CommentaryRequest, on_done: F) -> bool
    where
        F: FnOnce(CollaboratorResult<String>) + Send + 'static,
    {
        self.jobs
            .send(Job {
                request,
                on_done: Box::new(on_done),
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::Duration;

    use super::CommentaryDispatcher;
    use crate::engines::engine_trait::{
        CollaboratorError, CollaboratorResult, CommentaryEngine, CommentaryRequest, Evaluation,
    };

    struct Narrator;

    impl CommentaryEngine for Narrator {
        fn comment(&mut self, request: &CommentaryRequest) -> CollaboratorResult<String> {
            match request.evaluation {
                Some(eval) => Ok(format!("{} ({eval})", request.move_text)),
                None => Err(CollaboratorError::Protocol("no evaluation".to_owned())),
            }
        }
    }

    fn request(move_text: &str, evaluation: Option<Evaluation>) -> CommentaryRequest {
        CommentaryRequest {
            fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".to_owned(),
            move_text: move_text.to_owned(),
            evaluation,
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn callback_receives_text() {
        let dispatcher = CommentaryDispatcher::new(Box::new(Narrator));
        let (tx, rx) = channel();
        assert!(dispatcher.request(request("e2e4", Some(Evaluation::Centipawns(30))), move |result| {
            let _ = tx.send(result);
        }));
        let text = rx
            .recv_timeout(WAIT)
            .expect("callback ran")
            .expect("commentary succeeds");
        assert_eq!(text, "e2e4 (+0.30)");
    }

    #[test]
    fn callback_receives_failure() {
        let dispatcher = CommentaryDispatcher::new(Box::new(Narrator));
        let (tx, rx) = channel();
        dispatcher.request(request("e2e4", None), move |result| {
            let _ = tx.send(result);
        });
        assert!(rx.recv_timeout(WAIT).expect("callback ran").is_err());
    }

    #[test]
    fn answers_arrive_in_request_order() {
        let dispatcher = CommentaryDispatcher::new(Box::new(Narrator));
        let (tx, rx) = channel();
        let moves = ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"];
        for mv in moves {
            let tx = tx.clone();
            dispatcher.request(request(mv, Some(Evaluation::Centipawns(0))), move |result| {
                let _ = tx.send(result);
            });
        }

        let received: Vec<String> = moves
            .iter()
            .map(|_| {
                rx.recv_timeout(WAIT)
                    .expect("callback ran")
                    .expect("commentary succeeds")
            })
            .collect();
        let expected: Vec<String> = moves.iter().map(|mv| format!("{mv} (+0.00)")).collect();
        assert_eq!(received, expected);
    }
}
