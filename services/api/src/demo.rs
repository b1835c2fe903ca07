use capi_quality::conversions::{
    match_quality_report, prepare_event_for_api, validate_event_parameters, ConversionEvent,
    CustomData, UserData, UserDataKey,
};
use capi_quality::error::AppError;
use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::json;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Unix timestamp stamped on the sample events (defaults to now)
    #[arg(long)]
    pub(crate) at: Option<i64>,
    /// Print the full API payload for accepted events
    #[arg(long)]
    pub(crate) show_payload: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let occurred_at = args
        .at
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .unwrap_or_else(Utc::now);

    println!("Conversion quality demo");
    println!("Events stamped at {}", occurred_at.to_rfc3339());

    for (label, event) in sample_events(occurred_at) {
        render_event(label, &event, args.show_payload)?;
    }

    Ok(())
}

pub(crate) fn sample_events(occurred_at: DateTime<Utc>) -> Vec<(&'static str, ConversionEvent)> {
    let stamp = occurred_at.timestamp();

    let checkout = ConversionEvent::new(
        "Purchase",
        occurred_at,
        "website",
        ConversionEvent::generate_event_id("Purchase", occurred_at),
    )
    .with_user_data(
        UserData::default()
            .with(UserDataKey::Email, vec!["a8cfcd74832004951b4408cdb0a5dbcd"])
            .with(UserDataKey::Phone, vec!["0d107d09f5bbe40cade3de5c71e9e9b7"])
            .with(UserDataKey::ClientUserAgent, "Mozilla/5.0 (X11; Linux x86_64)")
            .with(UserDataKey::Fbp, format!("fb.1.{stamp}.1234567890"))
            .with(UserDataKey::Fbc, format!("fb.1.{stamp}.IwAR0demo")),
    )
    .with_custom_data(order_value());

    let quiz_lead = ConversionEvent::new(
        "Lead",
        occurred_at,
        "website",
        ConversionEvent::generate_event_id("Lead", occurred_at),
    )
    .with_user_data(
        UserData::default()
            .with(UserDataKey::Email, vec!["a8cfcd74832004951b4408cdb0a5dbcd"])
            .with(UserDataKey::ClickId, "IwAR0demo"),
    );

    let anonymous_visit = ConversionEvent::new(
        "ViewContent",
        occurred_at,
        "website",
        ConversionEvent::generate_event_id("ViewContent", occurred_at),
    )
    .with_user_data(
        UserData::default()
            .with(UserDataKey::City, vec!["saopaulo"])
            .with(UserDataKey::Country, vec!["br"])
            .with(UserDataKey::ClientUserAgent, "Mozilla/5.0 (X11; Linux x86_64)"),
    );

    vec![
        ("checkout purchase", checkout),
        ("quiz lead", quiz_lead),
        ("anonymous visit", anonymous_visit),
    ]
}

fn order_value() -> CustomData {
    let mut custom = CustomData::new();
    custom.insert("value".to_string(), json!(47.9));
    custom.insert("currency".to_string(), json!("BRL"));
    custom
}

fn render_event(label: &str, event: &ConversionEvent, show_payload: bool) -> Result<(), AppError> {
    println!("\n{} ({})", label, event.event_name);

    let report = validate_event_parameters(event);
    if report.is_valid() {
        println!("- validation: accepted");
    } else {
        println!("- validation: rejected");
        for message in report.messages() {
            println!("  - {message}");
        }
    }

    let quality = match_quality_report(&event.user_data);
    println!("- match quality: {}/100", quality.score);
    for advice in &quality.recommendations {
        println!("  - {advice}");
    }

    if show_payload {
        if let Ok(payload) = prepare_event_for_api(event) {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
