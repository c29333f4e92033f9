// ABOUTME: The `oyatz book` subcommand: fills a booking form from flags and submits it.
// ABOUTME: Loads config (or mail-only defaults), drives BookingFlow and waits out the reset.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use oyatz_booking::{
    BookingFlow, BookingForm, Config, Day, Delivery, Service, SubmitOutcome, TimeSlot,
};
use oyatz_platform::TerminalPlatform;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Service to request (repeatable), e.g. "braids" or "Colored Braids"
    #[arg(long = "service", value_name = "SERVICE")]
    pub services: Vec<String>,

    /// Email for replies and a confirmation copy
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Preferred day: saturday or sunday
    #[arg(long)]
    pub day: Option<String>,

    /// Preferred time slot (repeatable), e.g. "10:30 AM" or "14:00"
    #[arg(long = "time", value_name = "TIME")]
    pub times: Vec<String>,

    /// Anything else the stylist should know
    #[arg(long)]
    pub info: Option<String>,

    /// Path to configuration file
    #[arg(short, long, env = "OYATZ_BOOKING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Owner inbox to use when no config file exists
    #[arg(long, env = "OYATZ_OWNER_EMAIL")]
    pub owner_email: Option<String>,
}

pub async fn run(args: BookArgs) -> Result<()> {
    let config = load_config(args.config.as_ref(), args.owner_email.as_deref())?;
    let form = build_form(&args)?;

    let platform = TerminalPlatform::new(".");
    let mut flow = BookingFlow::from_config(config, &platform)
        .context("Failed to set up booking delivery")?;
    flow.open();
    *flow.form_mut() = form;

    for issue in flow.guidance() {
        eprintln!("{} {}", "!".yellow().bold(), issue);
    }

    println!("{}", flow.status().button_label().dimmed());
    match flow.submit().await {
        SubmitOutcome::Sent { delivery, reset } => {
            match delivery {
                Delivery::Relay { confirmation_sent } => {
                    println!("{} Booking request sent", flow.status().button_label().green().bold());
                    if confirmation_sent {
                        println!("  {}", "A confirmation copy is on its way to you.".dimmed());
                    }
                }
                Delivery::MailCompose { .. } => {
                    println!(
                        "{} Send the prepared email to finish your request.",
                        flow.status().button_label().green().bold()
                    );
                }
            }
            flow.settle(reset).await;
            info!("Booking dialog reset");
            Ok(())
        }
        SubmitOutcome::Blocked(issues) => Err(anyhow!(
            "Booking request is incomplete: {}",
            issues
                .iter()
                .map(|i| i.message())
                .collect::<Vec<_>>()
                .join("; ")
        )),
        SubmitOutcome::Ignored => bail!("Booking dialog is not accepting submissions"),
        SubmitOutcome::Failed(e) => {
            if let Some(message) = flow.error_message() {
                eprintln!("{} {}", "✗".red().bold(), message);
            }
            Err(anyhow::Error::new(e).context("Booking request failed"))
        }
    }
}

/// Explicit path, then the default path when it exists, then mail-only defaults.
fn load_config(path: Option<&PathBuf>, owner_email: Option<&str>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    if let Some(default) = Config::default_path().filter(|p| p.exists()) {
        return Config::load_from(&default)
            .with_context(|| format!("Failed to load config from {}", default.display()));
    }

    let owner = owner_email.ok_or_else(|| {
        anyhow!("No booking config found. Pass --config or --owner-email to choose where requests go")
    })?;
    let config = Config::for_owner(owner);
    config.validate().context("Invalid --owner-email")?;
    Ok(config)
}

fn build_form(args: &BookArgs) -> Result<BookingForm> {
    let mut form = BookingForm::new();
    form.set_name(args.name.as_str());

    if let Some(email) = &args.email {
        form.set_email(email.as_str());
    }
    if let Some(phone) = &args.phone {
        form.set_phone(phone.as_str());
    }
    if let Some(info) = &args.info {
        form.set_extra_info(info.as_str());
    }
    if let Some(day) = &args.day {
        let day = Day::parse(day)
            .ok_or_else(|| anyhow!("Unknown day '{}', expected saturday or sunday", day))?;
        form.select_day(day);
    }

    for raw in &args.times {
        let slot = TimeSlot::parse(raw).ok_or_else(|| {
            anyhow!(
                "Unknown time '{}', expected a half-hour slot between 9:00 AM and 6:00 PM",
                raw
            )
        })?;
        form.times.insert(slot);
    }

    for raw in &args.services {
        let service = Service::parse(raw).ok_or_else(|| {
            let known = Service::ALL
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!("Unknown service '{}', choose from: {}", raw, known)
        })?;
        form.services.insert(service);
    }

    Ok(form)
}
