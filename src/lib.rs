pub mod client;
pub mod config;
pub mod dom;
pub mod errors;
pub mod models;
pub mod panels;
pub mod progress;
pub mod ui;
pub mod widget;

pub use client::{ReadingClient, SubmitOutcome};
pub use config::ClientConfig;
pub use dom::Document;
pub use errors::WidgetError;
pub use models::{ReadingId, ReadingSnapshot, Submission};
pub use widget::{AfterSubmit, Completion, ReadingWidget, StatsToggle};
