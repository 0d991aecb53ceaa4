//! Dashboard data orchestration for the Afiya Zone admin panel.
//!
//! Wires the session gate, the admin API client and the domain crates into
//! the orchestrator the UI drives, plus the background notification poller.

pub mod chime;
pub mod config;
pub mod confirm;
pub mod notice;
pub mod orchestrator;
pub mod poller;
pub mod state;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use chime::{Chime, ChimeError, SilentChime, TerminalBell};
pub use config::{ConfigError, DashboardConfig};
pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm, TerminalConfirm};
pub use notice::{Notice, NoticeLevel, NoticeLog, NoticeSink, TracingNotices};
pub use orchestrator::{Dashboard, DashboardError};
pub use poller::NotificationPoller;
pub use state::DashboardState;
pub use view::{Modal, Tab, ViewState, status_badge};
