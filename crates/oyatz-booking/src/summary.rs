// ABOUTME: Renders a booking form into the texts every delivery path sends.
// ABOUTME: Plain-text table, escaped HTML table, requester confirmation and the mailto URI.

use crate::form::BookingForm;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const LABEL_WIDTH: usize = 30;
const MIN_VALUE_WIDTH: usize = 42;

pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Phone";
pub const PREFERRED_DAY: &str = "Preferred Day";
pub const PREFERRED_TIME: &str = "Preferred Time";
pub const SERVICES: &str = "Services Requested";
pub const ADDITIONAL_INFO: &str = "Additional Information";

/// A snapshot of the form as labeled, human-readable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    business_name: String,
    fields: Vec<(&'static str, String)>,
}

impl BookingSummary {
    pub fn new(form: &BookingForm, business_name: impl Into<String>) -> Self {
        let or = |value: &str, placeholder: &str| {
            let value = value.trim();
            if value.is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        };

        let times = form
            .times
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let services = form
            .services
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            business_name: business_name.into(),
            fields: vec![
                (NAME, or(&form.name, "Not provided")),
                (EMAIL, or(&form.email, "Not provided")),
                (PHONE, or(&form.phone, "Not provided")),
                (PREFERRED_DAY, form.day.to_string()),
                (PREFERRED_TIME, or(&times, "Not specified")),
                (SERVICES, or(&services, "None selected")),
                (ADDITIONAL_INFO, or(&form.extra_info, "None provided")),
            ],
        }
    }

    /// Ordered label/value pairs.
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    pub fn subject(&self) -> String {
        format!("New Booking Request from {} Website", self.business_name)
    }

    /// Box-drawn table of every field, for mail clients and plain-text relays.
    pub fn plain_text(&self) -> String {
        let cells: Vec<(&str, String)> = self
            .fields
            .iter()
            .map(|(label, value)| (*label, one_line(value)))
            .collect();
        let value_width = cells
            .iter()
            .map(|(_, v)| v.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_VALUE_WIDTH);
        let inner = LABEL_WIDTH + value_width + 4;
        let heavy = "━".repeat(inner + 2);
        let rule = "─".repeat(inner);
        let title = format!("NEW BOOKING REQUEST - {}", self.business_name.to_uppercase());

        let mut out = String::new();
        out.push_str(&heavy);
        out.push('\n');
        out.push_str(&center(&title, inner + 2));
        out.push('\n');
        out.push_str(&heavy);
        out.push_str("\n\n");

        out.push_str(&format!("┌{rule}┐\n"));
        out.push_str(&row("FIELD", "VALUE", value_width));
        for (label, value) in &cells {
            out.push_str(&format!("├{rule}┤\n"));
            out.push_str(&row(label, value, value_width));
        }
        out.push_str(&format!("└{rule}┘\n\n"));
        out.push_str(&heavy);
        out.push('\n');
        out
    }

    /// `<table>` summary for HTML-capable relays. All values are escaped.
    pub fn html_table(&self) -> String {
        let mut out = format!(
            "<h2>New Booking Request - {}</h2>\n<table border=\"1\" cellpadding=\"8\" cellspacing=\"0\">\n",
            escape_html(&self.business_name)
        );
        out.push_str("  <tr><th align=\"left\">Field</th><th align=\"left\">Value</th></tr>\n");
        for (label, value) in &self.fields {
            out.push_str(&format!(
                "  <tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                escape_html(label),
                escape_html(value).replace('\n', "<br>")
            ));
        }
        out.push_str("</table>\n");
        out
    }

    /// Acknowledgement sent back to the requester.
    pub fn confirmation_text(&self, phone_number: &str) -> String {
        let name = self
            .field(NAME)
            .filter(|n| *n != "Not provided")
            .unwrap_or("there");
        let mut out = format!(
            "Hi {name},\n\nThanks for your booking request with {}. Here is what we received:\n\n",
            self.business_name
        );
        for (label, value) in &self.fields {
            out.push_str(&format!("{label}: {}\n", one_line(value)));
        }
        out.push_str("\nWe will be in touch to confirm your appointment.");
        if !phone_number.trim().is_empty() {
            out.push_str(&format!(" If you need anything sooner, call {}.", phone_number.trim()));
        }
        out.push('\n');
        out
    }

    pub fn confirmation_subject(&self) -> String {
        format!("We received your booking request - {}", self.business_name)
    }

    /// `mailto:` URI with the subject and plain-text body pre-filled.
    pub fn mailto_uri(&self, to: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            to.trim(),
            encode_component(&self.subject()),
            encode_component(&self.plain_text())
        )
    }
}

pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

fn row(label: &str, value: &str, value_width: usize) -> String {
    format!(
        "│ {} │ {} │\n",
        pad(label, LABEL_WIDTH - 1),
        pad(value, value_width)
    )
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(left), text)
}

fn one_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Day, Service, TimeSlot};

    fn sample_form() -> BookingForm {
        let mut form = BookingForm::new();
        form.set_name("Ada Obi");
        form.set_email("ada@example.com");
        form.select_day(Day::Sunday);
        form.toggle_time(TimeSlot::new(13, 30).unwrap());
        form.toggle_time(TimeSlot::new(9, 0).unwrap());
        form.toggle_service(Service::Retwists);
        form.toggle_service(Service::Braids);
        form.set_extra_info("Waist length,\nmedium size");
        form
    }

    #[test]
    fn test_fields_in_order_with_placeholders() {
        let summary = BookingSummary::new(&sample_form(), "OYATZ Hair");
        let labels: Vec<_> = summary.fields().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![NAME, EMAIL, PHONE, PREFERRED_DAY, PREFERRED_TIME, SERVICES, ADDITIONAL_INFO]
        );
        assert_eq!(summary.field(PHONE), Some("Not provided"));
        assert_eq!(summary.field(PREFERRED_DAY), Some("Sunday"));
        assert_eq!(summary.field(PREFERRED_TIME), Some("9:00 AM, 1:30 PM"));
        assert_eq!(summary.field(SERVICES), Some("Braids, Retwists"));
    }

    #[test]
    fn test_empty_form_placeholders() {
        let summary = BookingSummary::new(&BookingForm::new(), "OYATZ Hair");
        assert_eq!(summary.field(PREFERRED_TIME), Some("Not specified"));
        assert_eq!(summary.field(SERVICES), Some("None selected"));
        assert_eq!(summary.field(ADDITIONAL_INFO), Some("None provided"));
    }

    #[test]
    fn test_plain_text_rows_align() {
        let text = BookingSummary::new(&sample_form(), "OYATZ Hair").plain_text();
        assert!(text.contains("NEW BOOKING REQUEST - OYATZ HAIR"));
        assert!(text.contains("Waist length, medium size"));

        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('│') || l.starts_with('├') || l.starts_with('┌'))
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.len() > 3);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_html_table_escapes_values() {
        let mut form = sample_form();
        form.set_extra_info("<script>alert('x')</script> & more");
        let html = BookingSummary::new(&form, "OYATZ Hair").html_table();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<td><strong>Services Requested</strong></td><td>Braids, Retwists</td>"));
    }

    #[test]
    fn test_confirmation_text_mentions_phone() {
        let summary = BookingSummary::new(&sample_form(), "OYATZ Hair");
        let text = summary.confirmation_text("+1234567890");
        assert!(text.starts_with("Hi Ada Obi,"));
        assert!(text.contains("Preferred Day: Sunday"));
        assert!(text.contains("call +1234567890."));
    }

    #[test]
    fn test_mailto_uri_is_percent_encoded() {
        let summary = BookingSummary::new(&sample_form(), "OYATZ Hair");
        let uri = summary.mailto_uri("owner@example.com");
        assert!(uri.starts_with(
            "mailto:owner@example.com?subject=New%20Booking%20Request%20from%20OYATZ%20Hair%20Website&body="
        ));
        let body = uri.split("&body=").nth(1).unwrap();
        assert!(!body.contains(' '));
        assert!(!body.contains('\n'));
        assert!(!body.contains('&'));
        assert!(body.contains("%0A"));
    }

    #[test]
    fn test_encode_component_matches_js() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("é"), "%C3%A9");
    }
}
