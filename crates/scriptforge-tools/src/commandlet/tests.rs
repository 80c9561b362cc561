//! Unit tests for the commandlet runner and its capture buffers

use std::time::Duration;

use scriptforge_core::types::CommandletResult;

use super::capture::CappedBuffer;
use super::{Commandlet, DEFAULT_TIMEOUT, TRUNCATION_MARKER};

#[test]
fn test_capped_buffer_under_limit_is_untouched() {
    let mut buf = CappedBuffer::new(16);
    buf.push(b"hello");
    buf.push(b" world");

    let (text, truncated) = buf.render(TRUNCATION_MARKER);
    assert_eq!(text, "hello world");
    assert!(!truncated);
}

#[test]
fn test_capped_buffer_exact_fill_is_not_truncated() {
    let mut buf = CappedBuffer::new(5);
    buf.push(b"hello");

    let (text, truncated) = buf.render(TRUNCATION_MARKER);
    assert_eq!(text, "hello");
    assert!(!truncated);
}

#[test]
fn test_capped_buffer_drops_past_limit_with_single_marker() {
    let mut buf = CappedBuffer::new(8);
    buf.push(b"hello");
    buf.push(b" world");
    buf.push(b"more data after the ceiling");

    let (text, truncated) = buf.render(TRUNCATION_MARKER);
    assert!(truncated);
    assert_eq!(text, format!("hello wo{}", TRUNCATION_MARKER));
    assert_eq!(text.matches(TRUNCATION_MARKER).count(), 1);
}

#[test]
fn test_capped_buffer_render_is_repeatable() {
    let mut buf = CappedBuffer::new(4);
    buf.push(b"abcdef");

    let first = buf.render(TRUNCATION_MARKER);
    let second = buf.render(TRUNCATION_MARKER);
    assert_eq!(first, second);
}

#[test]
fn test_builder_defaults() {
    let commandlet = Commandlet::new("/opt/host/HostEditor")
        .arg("ProjectName")
        .args(["-run=CompileScripts", "-unattended"]);

    assert_eq!(commandlet.executable.to_str(), Some("/opt/host/HostEditor"));
    assert_eq!(
        commandlet.args,
        vec!["ProjectName", "-run=CompileScripts", "-unattended"]
    );
    assert_eq!(commandlet.timeout, DEFAULT_TIMEOUT);
    assert!(commandlet.working_dir.is_none());
}

#[tokio::test]
async fn test_spawn_failure_resolves_to_result() {
    let result = Commandlet::new("/nonexistent/binary/for/sure")
        .timeout(Duration::from_secs(5))
        .run()
        .await;

    assert_eq!(result.exit_code, CommandletResult::EXIT_UNKNOWN);
    assert!(!result.timed_out);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("Failed to launch"));
    assert!(result.stderr.contains("/nonexistent/binary/for/sure"));
}

#[tokio::test]
async fn test_spawn_failure_on_bad_working_directory() {
    let result = Commandlet::new("sh")
        .arg("-c")
        .arg("true")
        .working_dir("/nonexistent/workdir/for/sure")
        .timeout(Duration::from_secs(5))
        .run()
        .await;

    assert_eq!(result.exit_code, CommandletResult::EXIT_UNKNOWN);
    assert!(!result.timed_out);
    assert!(result.stderr.contains("Failed to launch"));
}
