//! Table-driven tests for configuration loading and validation.

use semjobs::config::load_config_from_str;

struct ConfigTestCase {
    name: &'static str,
    config_json: &'static str,
    should_succeed: bool,
    expected_error: Option<&'static str>,
}

const JSON_CONFIG_TESTS: &[ConfigTestCase] = &[
    ConfigTestCase {
        name: "empty_object_uses_defaults",
        config_json: "{}",
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "full_config",
        config_json: r#"{
            "store": {
                "endpoint": "https://db.example.org/sparql",
                "updateEndpoint": "https://db.example.org/update",
                "timeoutSecs": 60,
                "headers": { "mu-auth-sudo": "true" }
            },
            "files": { "internalPrefix": "/data/", "externalPrefix": "data://" },
            "errors": { "subject": "Import Service", "graph": "http://mu.semte.ch/graphs/errors" },
            "creator": "http://example.org/services/import"
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "bad_update_endpoint",
        config_json: r#"{ "store": { "updateEndpoint": "database:8890" } }"#,
        should_succeed: false,
        expected_error: Some("store.updateEndpoint"),
    },
    ConfigTestCase {
        name: "empty_internal_prefix",
        config_json: r#"{ "files": { "internalPrefix": "" } }"#,
        should_succeed: false,
        expected_error: Some("files.internalPrefix"),
    },
    ConfigTestCase {
        name: "blank_error_subject",
        config_json: r#"{ "errors": { "subject": "  " } }"#,
        should_succeed: false,
        expected_error: Some("errors.subject"),
    },
    ConfigTestCase {
        name: "relative_creator",
        config_json: r#"{ "creator": "import-service" }"#,
        should_succeed: false,
        expected_error: Some("creator"),
    },
    ConfigTestCase {
        name: "timeout_wrong_type",
        config_json: r#"{ "store": { "timeoutSecs": "ten" } }"#,
        should_succeed: false,
        expected_error: Some("parse"),
    },
];

#[test]
fn test_json_config_loading() {
    for test_case in JSON_CONFIG_TESTS {
        let result = load_config_from_str(test_case.config_json);

        if test_case.should_succeed {
            assert!(
                result.is_ok(),
                "Test '{}': Expected success, got {:?}",
                test_case.name,
                result.err()
            );
        } else {
            let err = result.expect_err(test_case.name).to_string();
            if let Some(expected) = test_case.expected_error {
                assert!(
                    err.contains(expected),
                    "Test '{}': Expected error containing '{}', got '{}'",
                    test_case.name,
                    expected,
                    err
                );
            }
        }
    }
}

#[test]
fn test_full_config_values() {
    let config = load_config_from_str(JSON_CONFIG_TESTS[1].config_json).unwrap();
    assert_eq!(config.store.update_endpoint.as_deref(), Some("https://db.example.org/update"));
    assert_eq!(config.store.headers.get("mu-auth-sudo").map(String::as_str), Some("true"));
    assert_eq!(config.files.to_external_uri("/data/a.pdf"), "data://a.pdf");
    assert_eq!(config.creator_iri().as_str(), "http://example.org/services/import");
}
