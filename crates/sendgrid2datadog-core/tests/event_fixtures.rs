//! Decoding of recorded SendGrid webhook bodies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use sendgrid2datadog_core::{decode_events, MetricPoint};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/fixtures/{name}")).unwrap()
}

#[test]
fn bounce_event() {
    let events = decode_events(&load("bounce_event.json")).unwrap();
    assert_eq!(events.len(), 1);
    let ev = &events[0];

    assert_eq!(ev.event, "bounce");
    assert_eq!(ev.email.as_deref(), Some("example@test.com"));
    // single-string category
    assert_eq!(ev.category, vec!["cat facts"]);
    assert_eq!(ev.reason.as_deref(), Some("500 unknown recipient"));
    assert!(ev.response.is_none());
}

#[test]
fn deferred_event() {
    let events = decode_events(&load("deferred_event.json")).unwrap();
    assert_eq!(events.len(), 1);
    let ev = &events[0];

    assert_eq!(ev.event, "deferred");
    assert_eq!(ev.smtp_id.as_deref(), Some("<14c5d75ce93.dfd.64b469@ismtpd-555>"));
    assert_eq!(ev.category, vec!["cat facts"]);
    assert!(ev.reason.is_none());
    assert_eq!(ev.response.as_deref(), Some("400 try again later"));
}

#[test]
fn mixed_events_keep_order() {
    let events = decode_events(&load("mixed_events.json")).unwrap();
    let names: Vec<String> = events
        .iter()
        .map(|e| MetricPoint::counter_for("sendgrid", e).unwrap().name)
        .collect();

    assert_eq!(
        names,
        [
            "sendgrid.event.processed",
            "sendgrid.event.delivered",
            "sendgrid.event.open",
            "sendgrid.event.click",
            "sendgrid.event.group_unsubscribe",
        ]
    );
    assert_eq!(events[4].asm_group_id, Some(10));
    assert_eq!(events[3].url.as_deref(), Some("http://www.sendgrid.com/"));
}

#[test]
fn empty_array_is_valid() {
    assert!(decode_events(b"[]").unwrap().is_empty());
}
