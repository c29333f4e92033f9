// ABOUTME: Booking form state: contact fields, day toggle, time and service multi-select.
// ABOUTME: Validation returns inline guidance instead of failing, so editing can continue.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Days the salon takes bookings. Strictly one of two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Day {
    #[default]
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 2] = [Day::Saturday, Day::Sunday];

    pub fn other(self) -> Self {
        match self {
            Self::Saturday => Self::Sunday,
            Self::Sunday => Self::Saturday,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "saturday" | "sat" => Some(Self::Saturday),
            "sunday" | "sun" => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        })
    }
}

/// Services offered in the booking dialog, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Service {
    Braids,
    ColoredBraids,
    Twists,
    Locks,
    Retwists,
    HairStyling,
    Extensions,
    Consultation,
}

impl Service {
    pub const ALL: [Service; 8] = [
        Service::Braids,
        Service::ColoredBraids,
        Service::Twists,
        Service::Locks,
        Service::Retwists,
        Service::HairStyling,
        Service::Extensions,
        Service::Consultation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Braids => "Braids",
            Self::ColoredBraids => "Colored Braids",
            Self::Twists => "Twists",
            Self::Locks => "Locks",
            Self::Retwists => "Retwists",
            Self::HairStyling => "Hair Styling",
            Self::Extensions => "Extensions",
            Self::Consultation => "Consultation",
        }
    }

    /// Match a label loosely: case, spaces, dashes and underscores are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = squash(input);
        Self::ALL.into_iter().find(|s| squash(s.label()) == wanted)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A half-hour slot between 9:00 AM and 6:00 PM inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    minutes: u16,
}

impl TimeSlot {
    const FIRST: u16 = 9 * 60;
    const LAST: u16 = 18 * 60;
    const STEP: u16 = 30;

    /// `hour` is 24-hour. Returns `None` off the half-hour grid or outside opening hours.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        let minutes = hour as u16 * 60 + minute as u16;
        let on_grid = minute < 60 && minutes % Self::STEP == 0;
        (on_grid && (Self::FIRST..=Self::LAST).contains(&minutes)).then_some(Self { minutes })
    }

    /// All 19 slots in order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (Self::FIRST..=Self::LAST)
            .step_by(Self::STEP as usize)
            .map(|minutes| Self { minutes })
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Accepts `9:30 AM`, `9:30am`, `12:00 PM` or 24-hour `14:30`.
    pub fn parse(input: &str) -> Option<Self> {
        let lower = input.trim().to_ascii_lowercase();
        let (clock, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = lower.strip_suffix("pm") {
            (rest.trim_end(), Some(true))
        } else {
            (lower.as_str(), None)
        };

        let (h, m) = clock.split_once(':')?;
        let hour: u8 = h.parse().ok()?;
        let minute: u8 = m.parse().ok()?;
        if m.len() != 2 {
            return None;
        }

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return None,
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hour();
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", display_hour, self.minute(), suffix)
    }
}

/// Why the form cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    NameRequired,
    NoServices,
    InvalidEmail,
}

impl ValidationIssue {
    pub fn message(self) -> &'static str {
        match self {
            Self::NameRequired => "Please enter your name",
            Self::NoServices => "Please select at least one service",
            Self::InvalidEmail => "Please enter a valid email address",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything the requester typed into the booking dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub day: Day,
    pub times: BTreeSet<TimeSlot>,
    pub services: BTreeSet<Service>,
    pub extra_info: String,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_extra_info(&mut self, info: impl Into<String>) {
        self.extra_info = info.into();
    }

    pub fn select_day(&mut self, day: Day) {
        self.day = day;
    }

    pub fn toggle_day(&mut self) {
        self.day = self.day.other();
    }

    /// Add the service if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_service(&mut self, service: Service) -> bool {
        toggle(&mut self.services, service)
    }

    /// Add the slot if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_time(&mut self, slot: TimeSlot) -> bool {
        toggle(&mut self.times, slot)
    }

    /// Requester email, if one was typed.
    pub fn contact_email(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::NameRequired);
        }
        if self.services.is_empty() {
            issues.push(ValidationIssue::NoServices);
        }
        if let Some(email) = self.contact_email() {
            if !looks_like_email(email) {
                issues.push(ValidationIssue::InvalidEmail);
            }
        }
        issues
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

/// Minimal shape check: one `@`, something before it and a dotted domain after.
pub fn looks_like_email(input: &str) -> bool {
    match input.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !input.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}
