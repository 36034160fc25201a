use std::{fs, path::PathBuf};

use scout_common::observability::LogFormat;
use scout_config::{ConfigError, Mode, ScoutConfigLoader};
use serial_test::serial;
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const SECRETS: [(&str, Option<&str>); 4] = [
    ("TAVILY_API_KEY", Some("tvly-test")),
    ("GEMINI_API_KEY", Some("gem-test")),
    ("GMAIL_EMAIL", Some("bot@example.com")),
    ("GMAIL_APP_PASSWORD", Some("app-pass")),
];

#[test]
#[serial]
fn defaults_resolve_secrets_from_environment() {
    temp_env::with_vars(SECRETS, || {
        let cfg = ScoutConfigLoader::new().load().expect("load defaults");

        assert_eq!(cfg.search.api_key, "tvly-test");
        assert_eq!(cfg.search.max_results, 40);
        assert_eq!(cfg.search.search_depth, "advanced");
        assert_eq!(cfg.llm.api_key, "gem-test");
        assert_eq!(cfg.llm.model, "gemini-2.5-flash");
        assert_eq!(cfg.llm.temperature, None);
        assert_eq!(cfg.mail.username, "bot@example.com");
        assert_eq!(cfg.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(cfg.mail.smtp_port, 587);
        assert_eq!(cfg.mail.contact_recipient, "inovisionn@hotmail.com");
        assert_eq!(cfg.extraction.expected_leads, 10);
        assert!(!cfg.extraction.strict_count);
        assert_eq!(cfg.logging.format, LogFormat::Text);

        cfg.validate(Mode::LeadScan).expect("all secrets present");
    });
}

#[test]
#[serial]
fn missing_secrets_fail_validation_per_mode() {
    temp_env::with_vars(
        [
            ("TAVILY_API_KEY", None),
            ("GEMINI_API_KEY", None),
            ("GMAIL_EMAIL", Some("bot@example.com")),
            ("GMAIL_APP_PASSWORD", Some("app-pass")),
        ],
        || {
            let cfg = ScoutConfigLoader::new().load().expect("load defaults");

            cfg.validate(Mode::Contact)
                .expect("contact mode only needs mail credentials");

            match cfg.validate(Mode::LeadScan) {
                Err(ConfigError::Invalid(problems)) => {
                    assert_eq!(problems.len(), 2);
                    assert!(problems.iter().any(|p| p.contains("search.api_key")));
                    assert!(problems.iter().any(|p| p.contains("llm.api_key")));
                }
                other => panic!("expected Invalid, got {other:?}"),
            }
        },
    );
}

#[test]
#[serial]
fn file_then_environment_overlay() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "lead-scout.yaml",
        r#"
search:
  max_results: 20
  retries: 2
llm:
  temperature: 0.2
extraction:
  strict_count: true
mail:
  contact_recipient: "sales@example.com"
logging:
  format: "json"
"#,
    );

    temp_env::with_vars(
        [
            ("SCOUT__SEARCH__MAX_RESULTS", Some("25")),
            ("SCOUT__MAIL__SMTP_PORT", Some("2525")),
            ("GMAIL_EMAIL", Some("bot@example.com")),
        ],
        || {
            let cfg = ScoutConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load file + env");

            assert_eq!(cfg.search.max_results, 25);
            assert_eq!(cfg.search.retries, 2);
            assert_eq!(cfg.llm.temperature, Some(0.2));
            assert!(cfg.extraction.strict_count);
            assert_eq!(cfg.mail.contact_recipient, "sales@example.com");
            assert_eq!(cfg.mail.smtp_port, 2525);
            assert_eq!(cfg.mail.username, "bot@example.com");
            assert_eq!(cfg.logging.format, LogFormat::Json);
        },
    );
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.yaml");
    let err = ScoutConfigLoader::new()
        .with_cli_path(Some(&missing))
        .err()
        .expect("missing file must be rejected");
    assert!(matches!(err, ConfigError::MissingFile(_)));
}

#[test]
#[serial]
fn unresolved_placeholder_in_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "cfg.yaml",
        "mail:\n  password: \"${SCOUT_TEST_UNSET_PASSWORD}\"\n",
    );
    temp_env::with_vars(
        [
            ("SCOUT_TEST_UNSET_PASSWORD", None::<&str>),
            ("GMAIL_EMAIL", Some("bot@example.com")),
        ],
        || {
            let cfg = ScoutConfigLoader::new().with_file(&p).load().unwrap();
            let err = cfg.validate(Mode::Contact).unwrap_err();
            assert!(err.to_string().contains("mail.password"));
        },
    );
}

#[test]
#[serial]
fn secret_with_dollar_sign_is_taken_verbatim() {
    temp_env::with_vars(
        [
            ("TAVILY_API_KEY", Some("tvly-test")),
            ("GEMINI_API_KEY", Some("gem-test")),
            ("GMAIL_EMAIL", Some("bot@example.com")),
            ("GMAIL_APP_PASSWORD", Some("ab$HOME")),
            ("HOME", Some("/home/scout")),
        ],
        || {
            let cfg = ScoutConfigLoader::new().load().expect("load defaults");
            assert_eq!(cfg.mail.password, "ab$HOME");
            cfg.validate(Mode::LeadScan).expect("password is set");
        },
    );
}

#[test]
#[serial]
fn secret_that_looks_like_a_placeholder_is_valid() {
    temp_env::with_vars(
        [
            ("GMAIL_EMAIL", Some("bot@example.com")),
            ("GMAIL_APP_PASSWORD", Some("p${x}q")),
            ("x", None),
        ],
        || {
            let cfg = ScoutConfigLoader::new().load().expect("load defaults");
            assert_eq!(cfg.mail.password, "p${x}q");
            cfg.validate(Mode::Contact)
                .expect("value came from the environment, not from an unset placeholder");
        },
    );
}

#[test]
#[serial]
fn environment_overlay_is_not_expanded() {
    temp_env::with_vars(
        [
            ("GMAIL_EMAIL", Some("bot@example.com")),
            ("GMAIL_APP_PASSWORD", None),
            ("SCOUT__MAIL__PASSWORD", Some("s3cr$et${GMAIL_EMAIL}")),
        ],
        || {
            let cfg = ScoutConfigLoader::new().load().expect("load defaults");
            assert_eq!(cfg.mail.password, "s3cr$et${GMAIL_EMAIL}");
            cfg.validate(Mode::Contact)
                .expect("overlay replaced the unresolved default");
        },
    );
}

#[test]
#[serial]
fn unresolved_placeholder_error_names_the_variable_not_the_value() {
    temp_env::with_vars(
        [
            ("GMAIL_EMAIL", Some("bot@example.com")),
            ("GMAIL_APP_PASSWORD", None),
        ],
        || {
            let cfg = ScoutConfigLoader::new().load().expect("load defaults");
            let msg = cfg.validate(Mode::Contact).unwrap_err().to_string();
            assert!(msg.contains("mail.password references unset variable(s): GMAIL_APP_PASSWORD"));
            assert!(!msg.contains("${"));
        },
    );
}
