// ABOUTME: Booking dialog state machine: idle, submitting, success, error and the auto-reset.
// ABOUTME: Picks relay or mail-compose delivery and keeps form values across failed attempts.

use crate::config::Config;
use crate::error::{BookingError, Result};
use crate::form::{BookingForm, ValidationIssue};
use crate::relay::{RelayMessage, RelayTransport, Transport};
use crate::summary::BookingSummary;
use oyatz_platform::Platform;
use std::fmt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What the dialog shows about the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Submitting => "Sending...",
            Self::Success => "✓ Sent!",
            Self::Idle | Self::Error => "Submit Booking Request",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// How a successful submission reached the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The relay accepted the booking. `confirmation_sent` is false when no
    /// confirmation was attempted or it failed.
    Relay { confirmation_sent: bool },
    /// A pre-filled `mailto:` URI was handed to the platform.
    MailCompose { uri: String },
}

/// Proof of a particular success, redeemed when the reset timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket {
    generation: u64,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Blocked(Vec<ValidationIssue>),
    /// Dialog closed, a send already in flight, or a success awaiting reset.
    Ignored,
    Sent {
        delivery: Delivery,
        reset: ResetTicket,
    },
    /// The primary delivery failed. The form is untouched and can be resubmitted.
    Failed(BookingError),
}

/// One booking dialog with its own isolated state.
pub struct BookingFlow<P: Platform> {
    config: Config,
    transport: Option<Box<dyn Transport>>,
    platform: P,
    form: BookingForm,
    status: SubmissionStatus,
    open: bool,
    generation: u64,
    last_error: Option<String>,
}

impl<P: Platform> BookingFlow<P> {
    /// `transport: None` means the primary relay is unavailable and every
    /// submission goes through mail-compose.
    pub fn new(config: Config, transport: Option<Box<dyn Transport>>, platform: P) -> Self {
        Self {
            config,
            transport,
            platform,
            form: BookingForm::new(),
            status: SubmissionStatus::Idle,
            open: false,
            generation: 0,
            last_error: None,
        }
    }

    /// Build the relay transport from config when an access key is present.
    pub fn from_config(config: Config, platform: P) -> Result<Self> {
        let transport: Option<Box<dyn Transport>> = match config.relay_enabled() {
            Some(relay) => Some(Box::new(RelayTransport::new(relay)?) as Box<dyn Transport>),
            None => None,
        };
        Ok(Self::new(config, transport, platform))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Field edits. Allowed in every state; editing after an error keeps prior values.
    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_relay(&self) -> bool {
        self.transport.is_some()
    }

    /// Open the dialog with an empty form. No-op when already open.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.generation += 1;
        self.open = true;
        self.form.clear();
        self.status = SubmissionStatus::Idle;
        self.last_error = None;
        debug!(generation = self.generation, "Booking dialog opened");
    }

    /// Dismiss the dialog now. Clears the form and invalidates any pending reset.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.dismiss();
    }

    /// Inline guidance for the current form contents.
    pub fn guidance(&self) -> Vec<&'static str> {
        self.form.validate().into_iter().map(|i| i.message()).collect()
    }

    /// Text shown under the submit button after a failed delivery.
    pub fn error_message(&self) -> Option<String> {
        if self.status != SubmissionStatus::Error {
            return None;
        }
        let phone = self.config.site.phone_number.trim();
        Some(if phone.is_empty() {
            "Error sending request. Please try again or call directly.".to_string()
        } else {
            format!("Error sending request. Please try again or call {phone} directly.")
        })
    }

    /// Underlying error of the last failed delivery, for logs and diagnostics.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.open && self.accepts_submit() && self.form.validate().is_empty()
    }

    fn accepts_submit(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Idle | SubmissionStatus::Error
        )
    }

    /// Validate and deliver the current form.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.open || !self.accepts_submit() {
            debug!(open = self.open, status = %self.status, "Submit ignored");
            return SubmitOutcome::Ignored;
        }

        let issues = self.form.validate();
        if !issues.is_empty() {
            debug!(issues = ?issues, "Submit blocked by validation");
            return SubmitOutcome::Blocked(issues);
        }

        let submission_id = Uuid::new_v4();
        self.status = SubmissionStatus::Submitting;
        self.last_error = None;

        let summary = BookingSummary::new(&self.form, self.config.site.business_name.clone());
        info!(
            submission_id = %submission_id,
            services = self.form.services.len(),
            transport = self.transport.as_ref().map(|t| t.name()).unwrap_or("mailto"),
            "Submitting booking request"
        );

        let result = match self.deliver_primary(&summary).await {
            Ok(()) => Ok(Delivery::Relay {
                confirmation_sent: self.send_confirmation(&summary, submission_id).await,
            }),
            Err(PrimaryError::Unavailable) => self.hand_off_to_mail(&summary),
            Err(PrimaryError::Failed(e)) if self.config.booking.fallback_on_failure => {
                warn!(
                    submission_id = %submission_id,
                    error = %e,
                    "Relay delivery failed, falling back to mail client"
                );
                self.hand_off_to_mail(&summary)
            }
            Err(PrimaryError::Failed(e)) => Err(e),
        };

        match result {
            Ok(delivery) => {
                self.status = SubmissionStatus::Success;
                info!(submission_id = %submission_id, delivery = ?delivery_kind(&delivery), "Booking request sent");
                SubmitOutcome::Sent {
                    delivery,
                    reset: ResetTicket {
                        generation: self.generation,
                    },
                }
            }
            Err(e) => {
                error!(submission_id = %submission_id, error = %e, "Booking request failed");
                self.status = SubmissionStatus::Error;
                self.last_error = Some(e.to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Timer callback after a success: clear the form and close the dialog.
    ///
    /// Returns false, and does nothing, when the ticket is stale because the
    /// dialog was closed or reopened in the meantime.
    pub fn complete_reset(&mut self, ticket: ResetTicket) -> bool {
        if !self.open || ticket.generation != self.generation || self.status != SubmissionStatus::Success
        {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Stale reset ignored"
            );
            return false;
        }
        self.dismiss();
        true
    }

    /// Wait out the configured reset delay, then redeem the ticket.
    pub async fn settle(&mut self, ticket: ResetTicket) -> bool {
        tokio::time::sleep(self.config.reset_delay()).await;
        self.complete_reset(ticket)
    }

    fn dismiss(&mut self) {
        self.form.clear();
        self.status = SubmissionStatus::Idle;
        self.open = false;
        self.last_error = None;
        self.generation += 1;
        self.platform.dialog_closed();
        debug!(generation = self.generation, "Booking dialog dismissed");
    }

    async fn deliver_primary(
        &self,
        summary: &BookingSummary,
    ) -> std::result::Result<(), PrimaryError> {
        let transport = self.transport.as_ref().ok_or(PrimaryError::Unavailable)?;
        let message = RelayMessage::booking(summary, self.form.contact_email());
        transport
            .deliver(&message)
            .await
            .map_err(PrimaryError::Failed)
    }

    /// Best effort. Failures are logged and never change the outcome.
    async fn send_confirmation(&self, summary: &BookingSummary, submission_id: Uuid) -> bool {
        let (Some(transport), Some(to)) = (self.transport.as_ref(), self.form.contact_email())
        else {
            return false;
        };
        if !self.config.booking.send_confirmation {
            return false;
        }

        let message =
            RelayMessage::confirmation(summary, to, &self.config.site.phone_number);
        match transport.deliver(&message).await {
            Ok(()) => {
                debug!(submission_id = %submission_id, "Confirmation sent to requester");
                true
            }
            Err(e) => {
                warn!(
                    submission_id = %submission_id,
                    error = %e,
                    "Failed to send confirmation to requester"
                );
                false
            }
        }
    }

    fn hand_off_to_mail(&self, summary: &BookingSummary) -> Result<Delivery> {
        let uri = summary.mailto_uri(&self.config.site.owner_email);
        self.platform.open_url(&uri)?;
        Ok(Delivery::MailCompose { uri })
    }
}

enum PrimaryError {
    Unavailable,
    Failed(BookingError),
}

fn delivery_kind(delivery: &Delivery) -> &'static str {
    match delivery {
        Delivery::Relay { .. } => "relay",
        Delivery::MailCompose { .. } => "mailto",
    }
}
