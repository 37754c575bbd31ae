extern crate value_source;

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use value_source::error::ConfigError;
use value_source::host::fixture::HostFixture;
use value_source::registry::{SourceGetter, ValuesConfig};
use value_source::value::Value;

const HOST: &str = r##"
url = "https://shop.example/checkout?step=2"
name = "checkout"

[globals]
app = { version = "2.1", user = { id = 42 } }

[[elements]]
tag = "form"
id = "order"

[[elements.children]]
tag = "input"
id = "email"
attributes = { type = "email" }
value = "someone@example.com"

[[elements.children]]
tag = "input"
id = "newsletter"
attributes = { type = "checkbox", value = "yes" }
checked = true

[[elements.children]]
tag = "select"
id = "country"

[[elements.children.children]]
tag = "option"
attributes = { value = "de" }

[[elements.children.children]]
tag = "option"
attributes = { value = "fr" }
selected = true

[[parents]]
url = "https://shop.example/"
focused = true
frame = { tag = "iframe", id = "checkout-frame", attributes = { "data-step" = "2" } }
"##;

const VALUES: &str = r##"
[sources]
disabled = ["environment.has_focus", "document.checked"]

[values.page]
source = "environment.current_url"

[values.email]
source = "document.value"
parameters = "#email"

[values.newsletter]
source = "document.value"
parameters = "#newsletter"

[values.country]
source = "document.value"
parameters = "#country"

[values.version]
source = "global"
parameters = "app.version"

[values.user_id]
source = "global"
parameters = ["app.user.id"]

[values.step]
source = "environment.frame_attribute"
parameters = "data-step"

[values.focus]
source = "environment.has_focus"
default_value = "disabled"

[values.phone]
source = ["document.value", "direct"]
parameters = "#phone"
default_value = "unknown"
"##;

#[test]
fn test_load_from_files() {
    let dir = tempdir().unwrap();
    let host_path = dir.path().join("host.toml");
    let values_path = dir.path().join("values.toml");
    fs::write(&host_path, HOST).unwrap();
    fs::write(&values_path, VALUES).unwrap();

    let host = HostFixture::load(&host_path).unwrap().build().unwrap();
    let config = ValuesConfig::load(&values_path).unwrap();

    let mut getter = SourceGetter::with_builtins(host.window.as_window());
    getter.apply_config(&config);

    let resolved: Vec<(String, Value)> = config
        .names()
        .map(|name| (name.clone(), getter.get_named_value(&config, name).unwrap()))
        .collect();

    assert_eq!(
        resolved,
        vec![
            ("page".to_string(), Value::from("https://shop.example/checkout?step=2")),
            ("email".to_string(), Value::from("someone@example.com")),
            ("newsletter".to_string(), Value::from("yes")),
            ("country".to_string(), Value::from("fr")),
            ("version".to_string(), Value::from("2.1")),
            ("user_id".to_string(), Value::from(42)),
            ("step".to_string(), Value::from("2")),
            ("focus".to_string(), Value::from("disabled")),
            ("phone".to_string(), Value::from("#phone")),
        ]
    );
}

#[test]
fn test_apply_config_removes_disabled_sources() {
    let host = HostFixture::parse(HOST).unwrap().build().unwrap();
    let config = ValuesConfig::parse(VALUES).unwrap();
    let mut getter = SourceGetter::with_builtins(host.window.as_window());
    getter.apply_config(&config);

    let sources = getter.get_sources();
    assert!(sources.lookup("environment.has_focus").is_none());
    assert!(sources.lookup("document.checked").is_none());
    assert!(sources.lookup("environment.frame_depth").is_some());
    assert!(sources.lookup("document.value").is_some());
}

#[test]
fn test_unknown_named_value() {
    let config = ValuesConfig::parse(VALUES).unwrap();
    assert_eq!(SourceGetter::default().get_named_value(&config, "xxx"), None);
    assert_eq!(
        SourceGetter::default().get_named_value(&config, "phone"),
        Some(Value::from("unknown"))
    );
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(matches!(ValuesConfig::load(&missing), Err(ConfigError::Io { .. })));
    assert!(matches!(HostFixture::load(&missing), Err(ConfigError::Io { .. })));
}

#[test]
fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[values.a\nsource = ").unwrap();
    assert!(matches!(ValuesConfig::load(&path), Err(ConfigError::Parse(_))));
}
