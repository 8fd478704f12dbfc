use tracing::debug;

use crate::core::PlotParameters;

/// Permission to run one refresh with a given parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTicket {
    generation: u64,
    params: PlotParameters,
}

impl RefreshTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn params(&self) -> &PlotParameters {
        &self.params
    }
}

/// How a finished refresh should be treated.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// `false` when newer parameters were requested while the ticket ran.
    pub commit: bool,
    /// Ticket for the latest parameters queued meanwhile.
    pub next: Option<RefreshTicket>,
}

/// Keeps at most one refresh in flight and only the newest pending request.
///
/// Every request gets a generation number. A finished refresh may only be
/// shown if its generation is still the newest one requested; completion
/// order never decides.
#[derive(Debug, Default)]
pub struct RefreshCoalescer {
    latest_generation: u64,
    in_flight: Option<u64>,
    pending: Option<RefreshTicket>,
}

impl RefreshCoalescer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a ticket to run now, or `None` when the request was queued.
    ///
    /// A queued request replaces any older queued one.
    pub fn request(&mut self, params: PlotParameters) -> Option<RefreshTicket> {
        self.latest_generation += 1;
        let ticket = RefreshTicket {
            generation: self.latest_generation,
            params,
        };

        if self.in_flight.is_some() {
            if let Some(dropped) = self.pending.replace(ticket) {
                debug!(
                    generation = dropped.generation,
                    "superseded pending refresh dropped"
                );
            }
            return None;
        }

        self.in_flight = Some(ticket.generation);
        Some(ticket)
    }

    /// Marks `ticket` finished and hands out the queued request, if any.
    pub fn settle(&mut self, ticket: &RefreshTicket) -> Settlement {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
        let commit = self.is_current(ticket);
        if !commit {
            debug!(
                generation = ticket.generation,
                latest = self.latest_generation,
                "stale refresh result discarded"
            );
        }

        let next = if self.in_flight.is_none() {
            self.pending.take()
        } else {
            None
        };
        if let Some(next) = &next {
            self.in_flight = Some(next.generation);
        }

        Settlement { commit, next }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.latest_generation
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
