// ABOUTME: Library root for oyatz-booking.
// ABOUTME: Exports form, summary, relay, flow, config and error modules.

pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod relay;
pub mod summary;

pub use config::{BookingConfig, Config, RelayConfig, SiteConfig};
pub use error::{BookingError, Result};
pub use flow::{BookingFlow, Delivery, ResetTicket, SubmissionStatus, SubmitOutcome};
pub use form::{BookingForm, Day, Service, TimeSlot, ValidationIssue};
pub use relay::{RelayMessage, RelayResponse, RelayTransport, Transport};
pub use summary::BookingSummary;
