//! Notification feed state machine.
//!
//! `Idle -> Loading -> Idle`, driven by poll cycles. Each poll is tagged with
//! a monotonically increasing sequence number; a response whose sequence is
//! not newer than the last applied one is dropped, so a slow poll can never
//! overwrite a fresher one.

use afiya_core::NotificationId;

use crate::notification::Notification;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
}

/// Local, non-persisted view toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Orders,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !n.is_read,
            NotificationFilter::Orders => n.is_order_related(),
        }
    }
}

/// Sequence tag handed out by [`NotificationFeed::begin_poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollTicket(u64);

impl PollTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub applied: bool,
    /// Play the audible cue for this cycle.
    pub chime: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    pub phase: FeedPhase,
    pub items: Vec<Notification>,
    /// Server-authoritative; the list may be truncated while the count is global.
    pub unread_count: u64,
    pub open: bool,
    pub filter: NotificationFilter,
    issued: u64,
    applied: u64,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_poll(&mut self) -> PollTicket {
        self.issued += 1;
        self.phase = FeedPhase::Loading;
        PollTicket(self.issued)
    }

    /// Apply a completed poll unless a newer one was already applied.
    pub fn apply_poll(
        &mut self,
        ticket: PollTicket,
        items: Vec<Notification>,
        unread_count: u64,
    ) -> PollOutcome {
        self.settle(ticket);

        if ticket.0 <= self.applied {
            tracing::debug!(
                seq = ticket.0,
                applied = self.applied,
                "dropping stale notification poll"
            );
            return PollOutcome::default();
        }

        self.applied = ticket.0;
        self.items = items;
        self.unread_count = unread_count;

        let chime = self.unread_count > 0 && self.items.first().is_some_and(|n| !n.is_read);
        PollOutcome {
            applied: true,
            chime,
        }
    }

    /// A poll failed; prior items and count are kept.
    pub fn fail_poll(&mut self, ticket: PollTicket) {
        self.settle(ticket);
    }

    fn settle(&mut self, ticket: PollTicket) {
        if ticket.0 >= self.issued {
            self.phase = FeedPhase::Idle;
        }
    }

    pub fn find(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| &n.id == id)
    }

    /// Optimistically flip one item to read.
    ///
    /// Returns `false` (and changes nothing) when the item is unknown or
    /// already read. The counter never drops below zero.
    pub fn mark_read_local(&mut self, id: &NotificationId) -> bool {
        match self.items.iter_mut().find(|n| &n.id == id) {
            Some(n) if !n.is_read => {
                n.is_read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read_local(&mut self) {
        for n in &mut self.items {
            n.is_read = true;
        }
        self.unread_count = 0;
    }

    pub fn visible(&self) -> Vec<&Notification> {
        self.items.iter().filter(|n| self.filter.matches(n)).collect()
    }

    /// Bell badge text; `None` hides the badge.
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Pointer interaction; a press outside the open dropdown dismisses it.
    pub fn pointer_down(&mut self, inside: bool) {
        if self.open && !inside {
            self.open = false;
        }
    }
}
