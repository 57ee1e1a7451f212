use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use crate::wallet_browser::types::BridgeRequest;

/// Requests that can be tracked by id.
pub(crate) trait Queued {
    fn id(&self) -> Uuid;
}

impl Queued for BridgeRequest {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// FIFO of outstanding requests plus the responses posted for them.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Res> {
    requests: VecDeque<Req>,
    responses: HashMap<Uuid, Res>,
}

impl<Req, Res> Default for RequestQueue<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> RequestQueue<Req, Res> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_response(&mut self, id: Uuid, response: Res) {
        self.responses.insert(id, response);
    }

    /// Takes the response for `id`, if one was posted.
    pub fn get_response(&mut self, id: &Uuid) -> Option<Res> {
        self.responses.remove(id)
    }
}

impl<Req: Queued, Res> RequestQueue<Req, Res> {
    pub fn add_request(&mut self, request: Req) {
        self.requests.push_back(request);
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|r| r.id() == *id)
    }

    /// Peeks at the oldest outstanding request.
    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front()
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|r| r.id() != *id);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}
