//! SendGrid Event Webhook payload (JSON).
//!
//! A webhook POST carries a JSON array of event objects. Only `event` and
//! `timestamp` are required; the remaining well-known fields are kept so
//! callers can log or tag on them. Unknown fields are ignored because
//! SendGrid merges per-message custom arguments into each event.
//! See <https://docs.sendgrid.com/for-developers/tracking-events/event>.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer};

use crate::error::{RelayError, Result};

/// One email-delivery lifecycle occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendGridEvent {
    /// Event type name (e.g. "delivered", "bounce", "open").
    pub event: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "smtp-id")]
    pub smtp_id: Option<String>,
    /// Categories arrive as a single string or an array depending on how
    /// the message was sent; both normalize to a list.
    #[serde(default, deserialize_with = "string_or_seq")]
    pub category: Vec<String>,
    #[serde(default)]
    pub sg_event_id: Option<String>,
    #[serde(default)]
    pub sg_message_id: Option<String>,
    #[serde(default)]
    pub useragent: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub asm_group_id: Option<i64>,
    /// Bounce/drop reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Receiving MTA response (deferred/delivered).
    #[serde(default)]
    pub response: Option<String>,
}

impl SendGridEvent {
    /// Absolute time of the event.
    pub fn occurred_at(&self) -> Result<SystemTime> {
        UNIX_EPOCH
            .checked_add(Duration::from_secs(self.timestamp))
            .ok_or_else(|| {
                RelayError::MalformedPayload(format!("timestamp out of range: {}", self.timestamp))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn string_or_seq<'de, D>(de: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(de)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// Event types are metric name segments: ASCII alphanumerics, `_` and `-`.
fn valid_event_type(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Decode a webhook body into typed events.
///
/// Rejects anything that is not a JSON array of objects carrying a
/// well-formed `event` type and an unsigned integer `timestamp` that maps
/// to a representable time. Every event is checked before any is returned.
pub fn decode_events(body: &[u8]) -> Result<Vec<SendGridEvent>> {
    let events: Vec<SendGridEvent> = serde_json::from_slice(body)
        .map_err(|e| RelayError::MalformedPayload(e.to_string()))?;

    for (idx, ev) in events.iter().enumerate() {
        if !valid_event_type(&ev.event) {
            return Err(RelayError::MalformedPayload(format!(
                "event at index {idx} has an invalid event type: {:?}",
                ev.event
            )));
        }
        ev.occurred_at().map_err(|e| match e {
            RelayError::MalformedPayload(msg) => {
                RelayError::MalformedPayload(format!("event at index {idx}: {msg}"))
            }
            other => other,
        })?;
    }

    tracing::trace!(count = events.len(), "decoded webhook events");
    Ok(events)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn category_accepts_string_or_array() {
        let one = br#"[{"event":"open","timestamp":1,"category":"cat facts"}]"#;
        let many = br#"[{"event":"open","timestamp":1,"category":["a","b"]}]"#;
        let none = br#"[{"event":"open","timestamp":1}]"#;

        assert_eq!(decode_events(one).unwrap()[0].category, vec!["cat facts"]);
        assert_eq!(decode_events(many).unwrap()[0].category, vec!["a", "b"]);
        assert!(decode_events(none).unwrap()[0].category.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = br#"[{"event":"click","timestamp":5,"my_custom_arg":{"x":1},"ip":"1.2.3.4"}]"#;
        let events = decode_events(body).unwrap();
        assert_eq!(events[0].event, "click");
        assert_eq!(events[0].timestamp, 5);
    }

    #[test]
    fn rejects_non_array_and_missing_fields() {
        for body in [
            &b"not json"[..],
            br#"{"event":"open","timestamp":1}"#,
            br#"[{"timestamp":1}]"#,
            br#"[{"event":"open"}]"#,
            br#"[{"event":"open","timestamp":"yesterday"}]"#,
            br#"[{"event":"open","timestamp":-3}]"#,
            br#"[{"event":"","timestamp":1}]"#,
            br#"[1, 2]"#,
            br#"[{"event":"open|c\nsendgrid.event.bounce:100000","timestamp":5}]"#,
            br#"[{"event":"open:1|c","timestamp":5}]"#,
            br#"[{"event":"a.b","timestamp":5}]"#,
            br#"[{"event":"open#x,y","timestamp":5}]"#,
            br#"[{"event":"a","timestamp":1},{"event":"b","timestamp":18446744073709551615}]"#,
        ] {
            let err = decode_events(body).unwrap_err();
            assert_eq!(err.client_code().as_str(), "MALFORMED_PAYLOAD", "body: {body:?}");
        }
    }

    #[test]
    fn sendgrid_event_types_are_accepted() {
        let body = br#"[{"event":"group_unsubscribe","timestamp":1},{"event":"spam-report","timestamp":2},{"event":"open","timestamp":3}]"#;
        assert_eq!(decode_events(body).unwrap().len(), 3);
    }

    #[test]
    fn occurred_at_is_epoch_based() {
        let events = decode_events(br#"[{"event":"delivered","timestamp":1700000000}]"#).unwrap();
        let at = events[0].occurred_at().unwrap();
        assert_eq!(at.duration_since(UNIX_EPOCH).unwrap().as_secs(), 1_700_000_000);
    }
}
