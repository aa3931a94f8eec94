use crate::logs::StreamKey;
use pretty_assertions::assert_eq;

#[test]
fn stream_names_follow_the_run_layout() {
    assert_eq!(StreamKey::run("1234").stream_name(), "run/1234");
    assert_eq!(StreamKey::engine("1234").stream_name(), "run/1234/engine");
    assert_eq!(
        StreamKey::task("1234", "5678").stream_name(),
        "run/1234/task/5678"
    );
}

#[test]
fn manifest_stream_includes_the_uuid_when_known() {
    assert_eq!(
        StreamKey::manifest("1234", Some("abcd".into())).stream_name(),
        "manifest/run/1234/abcd"
    );
    assert_eq!(
        StreamKey::manifest("1234", None).stream_name(),
        "manifest/run/1234"
    );
}
