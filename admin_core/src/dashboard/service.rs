//! Fetches, reconciles and updates the admin request dashboard

use super::images::ImageUrlResolver;
use super::state::{distinct_pet_ids, DashboardState, PendingRequestView, SuccessEntryView};
use crate::backend::PetBackend;
use crate::models::{ActionOutcome, SendEmailCommand};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub pending: Vec<PendingRequestView>,
    pub successful: Vec<SuccessEntryView>,
}

/// Slices that are replaced by whole fetches. Pets ride on the requests
/// ticket because their ids come from the request list.
#[derive(Debug, Clone, Copy)]
enum Slice {
    Requests,
    SuccessEntries,
}

/// State plus the ticket of the newest write applied to each slice. Tickets
/// are taken when a fetch is issued, so a response that was issued before a
/// newer write is discarded.
#[derive(Debug, Default)]
struct Tracked {
    state: DashboardState,
    requests_ticket: u64,
    success_ticket: u64,
}

impl Tracked {
    fn ticket_mut(&mut self, slice: Slice) -> &mut u64 {
        match slice {
            Slice::Requests => &mut self.requests_ticket,
            Slice::SuccessEntries => &mut self.success_ticket,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    backend: Arc<dyn PetBackend>,
    images: ImageUrlResolver,
    tracked: Arc<RwLock<Tracked>>,
    tickets: Arc<AtomicU64>,
    alive: Arc<AtomicBool>,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn PetBackend>, images: ImageUrlResolver) -> Self {
        Self {
            backend,
            images,
            tracked: Arc::new(RwLock::new(Tracked::default())),
            tickets: Arc::new(AtomicU64::new(0)),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.tracked.read().state.clone()
    }

    pub fn view(&self) -> DashboardView {
        let state = self.snapshot();
        DashboardView {
            pending: state.pending_views(&self.images),
            successful: state.success_views(&self.images),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Stops all in-flight work from touching the state. Responses that
    /// arrive afterwards are dropped.
    pub fn detach(&self) {
        let _tracked = self.tracked.write();
        self.alive.store(false, Ordering::Release);
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn apply(
        &self,
        slice: Slice,
        ticket: u64,
        update: impl FnOnce(&DashboardState) -> DashboardState,
    ) -> bool {
        let mut guard = self.tracked.write();
        if !self.is_alive() {
            debug!("Dashboard detached, discarding late update");
            return false;
        }

        let tracked = &mut *guard;
        let newest = tracked.ticket_mut(slice);
        if ticket < *newest {
            debug!("Discarding stale {:?} response", slice);
            return false;
        }
        *newest = ticket;
        tracked.state = update(&tracked.state);
        true
    }

    /// Fetches pending requests (then their pets) and success entries.
    /// The two sequences run concurrently; failures keep the prior slice.
    pub async fn load(&self) {
        tokio::join!(self.load_requests(), self.load_success_entries());
    }

    async fn load_requests(&self) {
        let ticket = self.next_ticket();
        let requests = match self.backend.list_requests().await {
            Ok(requests) => requests,
            Err(e) => {
                error!("Error fetching requests: {}", e);
                return;
            }
        };

        let pet_ids = distinct_pet_ids(&requests);
        debug!("Fetched {} requests referencing {} pets", requests.len(), pet_ids.len());

        if !self.apply(Slice::Requests, ticket, |state| state.with_requests(requests)) {
            return;
        }

        match self.backend.list_pets(&pet_ids).await {
            Ok(pets) => {
                self.apply(Slice::Requests, ticket, |state| state.with_pets(pets));
            }
            Err(e) => error!("Error fetching pets for requests: {}", e),
        }
    }

    async fn load_success_entries(&self) {
        let ticket = self.next_ticket();
        match self.backend.list_success_entries().await {
            Ok(entries) => {
                self.apply(Slice::SuccessEntries, ticket, |state| {
                    state.with_success_entries(entries)
                });
            }
            Err(e) => error!("Error fetching success entries: {}", e),
        }
    }

    /// Drops a committed request and its pet. Listings issued before this
    /// point no longer reflect the backend and are discarded.
    fn remove_committed(&self, request_id: &str, pet_id: &str) {
        let ticket = self.next_ticket();
        let mut guard = self.tracked.write();
        if !self.is_alive() {
            debug!("Dashboard detached, discarding late update");
            return;
        }

        let tracked = &mut *guard;
        tracked.requests_ticket = ticket;
        tracked.success_ticket = ticket;
        tracked.state = tracked.state.without_request(request_id).without_pet(pet_id);
    }

    /// Emails the applicant, then asks the backend to move the request into
    /// the success collection. Local state changes only when both succeed.
    pub async fn send_email_and_mark_success(&self, command: &SendEmailCommand) -> ActionOutcome {
        info!(
            request_id = %command.request_id,
            pet_id = %command.pet_id,
            "Sending adoption email"
        );

        if let Err(e) = self
            .backend
            .send_notification(&command.user_email, command.pet_name.as_deref())
            .await
        {
            error!("Error processing request {}: {}", command.request_id, e);
            return ActionOutcome::Failed;
        }

        if let Err(e) = self
            .backend
            .commit_success(&command.request_id, &command.pet_id)
            .await
        {
            warn!(
                request_id = %command.request_id,
                "Applicant was emailed but the request was not marked successful"
            );
            error!("Error processing request {}: {}", command.request_id, e);
            return ActionOutcome::Failed;
        }

        self.remove_committed(&command.request_id, &command.pet_id);

        self.load_success_entries().await;

        info!(request_id = %command.request_id, "Request moved to success collection");
        ActionOutcome::Succeeded
    }
}
