use capi_quality::error::AppError;
use capi_quality::ConversionEvent;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads one event document from `path`, or stdin when no path is given.
pub(crate) fn read_event(path: Option<&Path>) -> Result<ConversionEvent, AppError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    parse_event(&raw)
}

pub(crate) fn parse_event(raw: &str) -> Result<ConversionEvent, AppError> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_reads_camel_case_document() {
        let event = parse_event(
            r#"{"eventName":"Lead","eventTime":1727179200,"actionSource":"website","eventId":"lead-1","userData":{"em":["hash"]}}"#,
        )
        .expect("document parses");

        assert_eq!(event.event_name, "Lead");
        assert_eq!(event.event_id, "lead-1");
    }

    #[test]
    fn parse_event_surfaces_malformed_json_as_input_error() {
        match parse_event("{\"eventName\": ") {
            Err(AppError::Input(_)) => {}
            other => panic!("expected input error, got {other:?}"),
        }
    }
}
