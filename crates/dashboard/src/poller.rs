//! Background worker that keeps the notification bell current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};

use afiya_client::{AdminApi, ApiError};
use afiya_core::{NotificationId, OrderId};
use afiya_notifications::{NotificationFeed, PollOutcome};

use crate::chime::Chime;
use crate::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::notice::{Notice, NoticeSink};

pub struct NotificationPoller<A: AdminApi, C: Chime> {
    api: Arc<A>,
    chime: Arc<C>,
    notices: Arc<dyn NoticeSink>,
    feed: Arc<Mutex<NotificationFeed>>,
    interval: Duration,
    shutdown: Arc<Notify>,
}

impl<A: AdminApi, C: Chime> Clone for NotificationPoller<A, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            chime: self.chime.clone(),
            notices: self.notices.clone(),
            feed: self.feed.clone(),
            interval: self.interval,
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<A: AdminApi, C: Chime> NotificationPoller<A, C> {
    pub fn new(
        api: Arc<A>,
        chime: Arc<C>,
        notices: Arc<dyn NoticeSink>,
        interval: Duration,
    ) -> Self {
        // `tokio::time::interval` panics on a zero period.
        let interval = if interval.is_zero() {
            tracing::warn!("zero poll interval; using the default");
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
        } else {
            interval
        };
        Self {
            api,
            chime,
            notices,
            feed: Arc::new(Mutex::new(NotificationFeed::new())),
            interval,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Shared feed, for UI interactions (dropdown, filter).
    pub fn feed(&self) -> Arc<Mutex<NotificationFeed>> {
        self.feed.clone()
    }

    pub async fn snapshot(&self) -> NotificationFeed {
        self.feed.lock().await.clone()
    }

    /// Run one poll cycle: list and unread count together, applied atomically.
    pub async fn poll_once(&self) -> PollOutcome {
        let ticket = self.feed.lock().await.begin_poll();

        let result = tokio::try_join!(self.api.list_notifications(), self.api.unread_count());

        let outcome = {
            let mut feed = self.feed.lock().await;
            match result {
                Ok((items, unread)) => feed.apply_poll(ticket, items, unread),
                Err(err) => {
                    tracing::warn!(error = %err, seq = ticket.seq(), "notification poll failed");
                    feed.fail_poll(ticket);
                    PollOutcome::default()
                }
            }
        };

        if outcome.chime {
            if let Err(err) = self.chime.play() {
                tracing::debug!(error = %err, "notification chime unavailable");
            }
        }
        outcome
    }

    /// Mark one notification read and return the order it points at, if any.
    ///
    /// The local flip happens before the request; if the request fails the
    /// feed is reconciled with one immediate re-poll. The dropdown closes when
    /// there is an order to navigate to.
    pub async fn mark_as_read(&self, id: &NotificationId) -> Option<OrderId> {
        let (order_id, flipped) = {
            let mut feed = self.feed.lock().await;
            let order_id = feed.find(id).and_then(|n| n.order_id.clone());
            let flipped = feed.mark_read_local(id);
            if order_id.is_some() {
                feed.close();
            }
            (order_id, flipped)
        };

        if flipped {
            if let Err(err) = self.api.mark_notification_read(id).await {
                tracing::warn!(error = %err, id = %id, "mark-as-read failed; re-polling");
                self.poll_once().await;
            }
        }
        order_id
    }

    /// Server first; local state only changes once the request succeeds.
    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        if let Err(err) = self.api.mark_all_notifications_read().await {
            tracing::warn!(error = %err, "mark-all-read failed");
            return Err(err);
        }
        self.feed.lock().await.mark_all_read_local();
        self.notices
            .notify(Notice::success("All notifications marked as read"));
        Ok(())
    }

    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

impl<A, C> NotificationPoller<A, C>
where
    A: AdminApi + 'static,
    C: Chime + 'static,
{
    /// Spawn the poll loop: one poll right away, then one per interval.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let poller = self.clone();

        tokio::spawn(async move {
            tracing::info!(interval = ?poller.interval, "notification poller started");

            let mut ticker = tokio::time::interval(poller.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = poller.shutdown.notified() => {
                        tracing::info!("notification poller received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        poller.poll_once().await;
                    }
                }
            }

            tracing::info!("notification poller stopped");
        })
    }
}
