//! Background fetches. Each request runs on its own thread and reports back
//! over a channel, tagged with the navigation generation that started it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use image::DynamicImage;

use crate::catalog::poster::fetch_poster;
use crate::catalog::{CatalogClient, CatalogError, CatalogRequest, MovieDetails, MovieId, MoviePage};

/// Shared flag flipped when the view that asked for the data goes away.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub enum Job {
    Listing(CatalogRequest),
    Details(MovieId),
    Poster(String),
}

#[derive(Debug)]
pub enum FetchPayload {
    Listing(Result<MoviePage, CatalogError>),
    Details(Result<MovieDetails, CatalogError>),
    Poster(Result<DynamicImage, CatalogError>),
}

#[derive(Debug)]
pub struct FetchMessage {
    pub generation: u64,
    pub payload: FetchPayload,
}

/// Where a worker reports, and how it learns it is no longer wanted.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub generation: u64,
    pub cancel: CancelToken,
    pub sender: Sender<FetchMessage>,
}

pub fn spawn(client: CatalogClient, ticket: Ticket, job: Job) -> JoinHandle<()> {
    thread::spawn(move || run(&client, ticket, job))
}

/// Runs one job to completion. The request itself cannot be interrupted, so
/// cancellation is checked before it is issued and before its result is sent.
pub fn run(client: &CatalogClient, ticket: Ticket, job: Job) {
    if ticket.cancel.is_cancelled() {
        tracing::debug!(generation = ticket.generation, ?job, "fetch cancelled before start");
        return;
    }

    let payload = match job {
        Job::Listing(request) => {
            FetchPayload::Listing(client.execute(&request).and_then(|body| body.decode()))
        }
        Job::Details(id) => {
            FetchPayload::Details(client.movie_details(&id).and_then(|body| body.decode()))
        }
        Job::Poster(url) => FetchPayload::Poster(fetch_poster(client, &url)),
    };

    if ticket.cancel.is_cancelled() {
        tracing::debug!(generation = ticket.generation, "dropping result of cancelled fetch");
        return;
    }

    // The receiver only disappears when the app is shutting down.
    let _ = ticket.sender.send(FetchMessage {
        generation: ticket.generation,
        payload,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogConfig, Page};
    use reqwest::Url;
    use std::sync::mpsc;

    fn unreachable_client() -> CatalogClient {
        // port 9 (discard) is closed on test machines; connect fails fast
        let base = Url::parse("http://127.0.0.1:9/3").unwrap();
        CatalogClient::new(CatalogConfig::new(base)).unwrap()
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn cancelled_job_reports_nothing() {
        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();
        cancel.cancel();
        let ticket = Ticket {
            generation: 3,
            cancel,
            sender,
        };
        run(&unreachable_client(), ticket, Job::Listing(CatalogRequest::popular(Page::FIRST)));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn transport_failure_is_reported_with_generation() {
        let (sender, receiver) = mpsc::channel();
        let ticket = Ticket {
            generation: 5,
            cancel: CancelToken::new(),
            sender,
        };
        spawn(unreachable_client(), ticket, Job::Details(MovieId::from(42)))
            .join()
            .unwrap();

        let message = receiver.recv().unwrap();
        assert_eq!(message.generation, 5);
        assert!(matches!(
            message.payload,
            FetchPayload::Details(Err(CatalogError::Transport(_)))
        ));
    }
}
