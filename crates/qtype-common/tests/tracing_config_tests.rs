use super::*;

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse(" text "), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
}

#[test]
fn test_bare_level_targets_qtype_crates() {
    assert_eq!(
        filter_directives("trace"),
        "qtype_catalog=trace,qtype_resolver=trace"
    );
    assert_eq!(
        filter_directives(" Warn "),
        "qtype_catalog=warn,qtype_resolver=warn"
    );
}

#[test]
fn test_switch_values_mean_debug() {
    for value in ["1", "on", ""] {
        assert_eq!(
            filter_directives(value),
            "qtype_catalog=debug,qtype_resolver=debug"
        );
    }
}

#[test]
fn test_full_directives_pass_through() {
    assert_eq!(
        filter_directives("qtype_resolver=trace,my_compiler=info"),
        "qtype_resolver=trace,my_compiler=info"
    );
    assert_eq!(filter_directives("my_compiler=debug"), "my_compiler=debug");
}

#[test]
fn test_install_twice_keeps_first_subscriber() {
    let config = TracingConfig {
        directives: Some(filter_directives("error")),
        format: LogFormat::Text,
    };
    config.install();
    config.install();
    init_tracing();
}
