use crate::infra::{sample_service, DeskService};
use chrono::NaiveDate;
use clap::Args;
use consent_desk::consent::{
    ConfiguredCredentials, ConsentFilter, ConsentRecord, DraftField, InMemorySubmissionStore,
    SubmissionError,
};
use consent_desk::error::AppError;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Case-insensitive match against "given names surname" or email
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Exact consent date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Case-insensitive match against the event name
    #[arg(long, default_value = "")]
    pub(crate) event: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Simulated store round trip in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub(crate) latency_ms: u64,
    /// Stop after the submission step.
    #[arg(long)]
    pub(crate) skip_admin: bool,
}

pub(crate) async fn run_listing(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        search,
        date,
        event,
    } = args;

    let service = sample_service();
    let mut view = service.admin_view();
    view.load().await?;

    let filter = ConsentFilter::new(search, date, event);
    let matched = view.filter(&filter);
    render_listing(&matched, view.records().len());
    Ok(())
}

pub(crate) async fn run_event_listing() -> Result<(), AppError> {
    let service = sample_service();
    let mut view = service.admin_view();
    view.load().await?;

    println!("Events on record");
    for name in view.distinct_event_names() {
        println!("- {name}");
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        latency_ms,
        skip_admin,
    } = args;

    let store = Arc::new(
        InMemorySubmissionStore::with_sample_records()
            .with_latency(Duration::from_millis(latency_ms)),
    );
    let service = DeskService::new(store, Arc::new(ConfiguredCredentials::default()));

    println!("Consent form demo (personal fields shown as entered)");
    let mut form = service.open_form();
    println!("- Opened form dated {}", form.draft().date);

    form.update_field(DraftField::Surname, "Doe");
    form.update_field(DraftField::OtherNames, "John");
    form.update_field(DraftField::Email, "john.doe");
    form.update_field(DraftField::EventName, "Youth Summit 2024");

    match form.submit().await {
        Err(SubmissionError::ValidationFailed(report)) => {
            println!("- First attempt rejected ({} issues):", report.len());
            for (field, message) in report.iter() {
                println!("    {}: {}", field.label(), message);
            }
        }
        Ok(reference_id) => println!("- Unexpectedly accepted as {reference_id}"),
        Err(err) => return Err(err.into()),
    }

    form.update_field(DraftField::Email, "john.doe@example.com");
    form.update_field(DraftField::Telephone, "0712345678");
    form.update_field(DraftField::IdNumber, "12345678");
    form.update_field(DraftField::EventLocation, "KICC");
    form.update_field(DraftField::Consent, true);

    let reference_id = form.submit().await?;
    println!(
        "- Second attempt {} with reference {}",
        form.status().label(),
        reference_id
    );

    if skip_admin {
        return Ok(());
    }

    println!("\nAdmin view");
    let mut view = service.admin_view();
    view.load().await?;
    render_listing(&view.filter(&ConsentFilter::default()), view.records().len());

    let filter = ConsentFilter::new("john", None, "summit");
    let matched = view.filter(&filter);
    println!("\nSearch \"john\" at events matching \"summit\"");
    render_listing(&matched, view.records().len());

    println!("\nEvent selector options");
    for name in view.distinct_event_names() {
        println!("- {name}");
    }

    Ok(())
}

fn render_listing(records: &[&ConsentRecord], total: usize) {
    if records.is_empty() {
        println!("No submissions found ({total} on record).");
        return;
    }

    println!("{} of {} submissions", records.len(), total);
    for record in records {
        println!(
            "- {} | {} | {} | {} ({}) | signed {} | recorded {}",
            record.id,
            record.full_name(),
            record.email,
            record.event_name,
            record.event_location,
            record.date,
            record.created_at.format("%Y-%m-%d %H:%M UTC"),
        );
    }
}
