//! Session orchestration: external signals in, collaborator actions out.
//!
//! ```text
//! hotkey / window / provider / input
//!          │ publish
//!          ▼
//!     SignalHub ──► mpsc queue ──► Session::handle_event ──► Vec<Action>
//!                                        ▲                       │
//!                                        │                       ▼
//!                                        └──── feedback ◄──── Runtime
//!                                         (launch results,   (LaunchService,
//!                                          elapsed timers)    WindowService)
//! ```
//!
//! # Modules
//!
//! - [`events`]: inbound signals and their topics
//! - [`actions`]: outbound side effects
//! - [`orchestrator`]: the [`Session`] and its event handler
//! - [`timer`]: debounce handle and host timer queue
//! - [`signals`]: subscription registry
//! - [`services`]: collaborator traits
//! - [`runtime`]: action executor

pub mod actions;
pub mod events;
pub mod orchestrator;
pub mod runtime;
pub mod services;
pub mod signals;
pub mod timer;

pub use actions::Action;
pub use events::{Event, Topic};
pub use orchestrator::Session;
pub use runtime::Runtime;
pub use services::{DirectoryProvider, LaunchService, WindowService};
pub use signals::{SignalHub, Subscription};
pub use timer::{HideTimer, TimerId, TimerQueue};
