use crate::{WorkerMessage, parse_line};

#[test]
fn given_ready_json_when_parsed_then_ready() {
    assert_eq!(parse_line(r#"{"type":"ready"}"#), Some(WorkerMessage::Ready));
}

#[test]
fn given_padded_ready_json_when_parsed_then_ready() {
    assert_eq!(
        parse_line("  {\"type\": \"ready\"}\r"),
        Some(WorkerMessage::Ready)
    );
}

#[test]
fn given_plain_log_line_when_parsed_then_none() {
    assert_eq!(parse_line("Listening on http://localhost:1617"), None);
}

#[test]
fn given_unknown_message_type_when_parsed_then_none() {
    assert_eq!(parse_line(r#"{"type":"stats","rss":1024}"#), None);
}

#[test]
fn given_broken_json_when_parsed_then_none() {
    assert_eq!(parse_line(r#"{"type":"ready""#), None);
}
