//! Per-row address lookups for the event list.
//!
//! Each visible row is a reusable cell bound to one event at a time. Binding
//! a cell to a new event cancels the request issued for the previous one,
//! and replies are applied only if the cell still shows the event they were
//! requested for.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::AddressLookup;
use crate::model::{Event, EventId};

/// A finished lookup addressed to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressReply {
    pub slot: usize,
    pub subject: EventId,
    pub address: Option<String>,
}

#[derive(Debug, Default)]
struct AddressCell {
    subject: Option<EventId>,
    address: Option<String>,
    request: Option<CancellationToken>,
}

impl AddressCell {
    fn cancel(&mut self) {
        if let Some(token) = self.request.take() {
            token.cancel();
        }
    }
}

/// Reusable address cells backed by an [`AddressLookup`].
pub struct AddressCells {
    cells: Vec<AddressCell>,
    lookup: Arc<dyn AddressLookup>,
    runtime: Handle,
    tx: UnboundedSender<AddressReply>,
    rx: UnboundedReceiver<AddressReply>,
}

impl AddressCells {
    /// Lookups are spawned onto `runtime`.
    pub fn new(lookup: Arc<dyn AddressLookup>, runtime: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            cells: Vec::new(),
            lookup,
            runtime,
            tx,
            rx,
        }
    }

    fn cell_mut(&mut self, slot: usize) -> &mut AddressCell {
        if slot >= self.cells.len() {
            self.cells.resize_with(slot + 1, AddressCell::default);
        }
        &mut self.cells[slot]
    }

    /// Shows `event` in `slot`. Rebinding to the same event keeps the current
    /// address; any other event cancels the old request and starts a new one.
    pub fn bind(&mut self, slot: usize, event: &Event) {
        let subject = event.id;
        let lookup = Arc::clone(&self.lookup);
        let tx = self.tx.clone();
        let runtime = self.runtime.clone();

        let cell = self.cell_mut(slot);
        if cell.subject == Some(subject) {
            return;
        }
        cell.cancel();
        cell.subject = Some(subject);
        cell.address = None;

        let token = CancellationToken::new();
        cell.request = Some(token.clone());

        let request = lookup.lookup(event.coordinate);
        runtime.spawn(async move {
            if let Some(address) = token.run_until_cancelled(request).await {
                let _ = tx.send(AddressReply {
                    slot,
                    subject,
                    address,
                });
            } else {
                trace!(slot, %subject, "address lookup cancelled");
            }
        });
    }

    /// Clears `slot` and cancels its request.
    pub fn unbind(&mut self, slot: usize) {
        if let Some(cell) = self.cells.get_mut(slot) {
            cell.cancel();
            cell.subject = None;
            cell.address = None;
        }
    }

    /// Clears every cell beyond the first `len`.
    pub fn truncate(&mut self, len: usize) {
        for slot in len..self.cells.len() {
            self.unbind(slot);
        }
    }

    /// Applies a reply if its cell still shows the same event.
    pub fn apply(&mut self, reply: AddressReply) -> bool {
        match self.cells.get_mut(reply.slot) {
            Some(cell) if cell.subject == Some(reply.subject) => {
                cell.address = reply.address;
                cell.request = None;
                true
            }
            _ => {
                debug!(slot = reply.slot, subject = %reply.subject, "stale address reply dropped");
                false
            }
        }
    }

    /// Applies every reply received so far. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.rx.try_recv() {
            if self.apply(reply) {
                applied += 1;
            }
        }
        applied
    }

    /// The event currently shown in `slot`.
    pub fn subject(&self, slot: usize) -> Option<EventId> {
        self.cells.get(slot).and_then(|c| c.subject)
    }

    /// The resolved address for `slot`, once it has arrived.
    pub fn address(&self, slot: usize) -> Option<&str> {
        self.cells.get(slot).and_then(|c| c.address.as_deref())
    }

    /// Whether `slot` is still waiting for its lookup.
    pub fn is_pending(&self, slot: usize) -> bool {
        self.cells.get(slot).is_some_and(|c| c.request.is_some())
    }
}
