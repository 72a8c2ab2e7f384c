//! JSON formatting of individual log records.

use serde::ser::{SerializeMap, Serializer};
use time::format_description::well_known::Iso8601;

use crate::{Identity, Level, LoggerError, keys};

/// Serializes log records as single-line JSON objects.
///
/// The host identity (`pid`, `hostname`) is captured once at construction,
/// not per record.
#[derive(Debug)]
pub(crate) struct JsonFormatter {
    pid: u32,
    hostname: String,
}

impl JsonFormatter {
    pub(crate) fn new() -> Self {
        Self {
            pid: std::process::id(),
            hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }

    /// Serializes one record into a memory buffer.
    ///
    /// The buffer holds the complete record so the sink can append it with a
    /// single write. `error` is `None` for levels that carry no error field;
    /// error-class records always pass `Some`, even for an empty string.
    pub(crate) fn format(
        &self,
        level: Level,
        identity: &Identity,
        error: Option<&str>,
        message: &str,
    ) -> Result<Vec<u8>, LoggerError> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, serde_json::ser::CompactFormatter);
        let mut map_serializer = serializer.serialize_map(None)?;

        map_serializer.serialize_entry(keys::MESSAGE, message)?;
        map_serializer.serialize_entry(keys::HOSTNAME, &self.hostname)?;
        map_serializer.serialize_entry(keys::PID, &self.pid)?;
        map_serializer.serialize_entry(keys::LEVEL, level.as_str())?;

        if let Ok(time) = time::UtcDateTime::now().format(&Iso8601::DEFAULT) {
            map_serializer.serialize_entry(keys::TIME, &time)?;
        }

        map_serializer.serialize_entry(keys::NAME, &identity.name)?;
        map_serializer.serialize_entry(keys::UID, &identity.uid)?;
        map_serializer.serialize_entry(keys::SRV, &identity.service)?;

        if let Some(error) = error {
            map_serializer.serialize_entry(keys::ERROR, error)?;
        }

        map_serializer.end()?;
        Ok(buffer)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            uid: "a1b2c3".to_string(),
            name: "worker-1".to_string(),
            service: "app".to_string(),
        }
    }

    #[test]
    fn record_is_single_line_json_with_identity_fields() {
        let formatter = JsonFormatter::new();
        let buffer = formatter
            .format(Level::Info, &identity(), None, "started")
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(!text.contains('\n'));

        let record: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(record["message"], "started");
        assert_eq!(record["level"], "Info");
        assert_eq!(record["name"], "worker-1");
        assert_eq!(record["uid"], "a1b2c3");
        assert_eq!(record["srv"], "app");
        assert!(record["time"].is_string());
        assert!(record["hostname"].is_string());
        assert!(record["pid"].is_number());
    }

    #[test]
    fn error_field_only_present_when_supplied() {
        let formatter = JsonFormatter::new();

        let plain = formatter
            .format(Level::Info, &identity(), None, "ok")
            .unwrap();
        let plain: serde_json::Value = serde_json::from_slice(&plain).unwrap();
        assert!(plain.get("error").is_none());

        let failed = formatter
            .format(Level::Error, &identity(), Some("disk full"), "write failed")
            .unwrap();
        let failed: serde_json::Value = serde_json::from_slice(&failed).unwrap();
        assert_eq!(failed["error"], "disk full");

        let absent = formatter
            .format(Level::Fatal, &identity(), Some(""), "giving up")
            .unwrap();
        let absent: serde_json::Value = serde_json::from_slice(&absent).unwrap();
        assert_eq!(absent["error"], "");
    }
}
