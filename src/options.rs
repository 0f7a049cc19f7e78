// ABOUTME: Typed presentation-engine options and their per-key validation table
// ABOUTME: Renders each option as a JavaScript literal for the engine's initialize block

use crate::errors::{Result, SlideError};
use serde::Deserialize;
use serde_json::{Number, Value};

/// Value of a single engine option as written in YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum OptionValue {
    Null,
    String(String),
    Bool(bool),
    Number(Number),
    /// Arrays and maps, passed to the engine as JSON.
    Raw(Value),
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => OptionValue::Null,
            Value::Bool(b) => OptionValue::Bool(b),
            Value::Number(n) => OptionValue::Number(n),
            Value::String(s) => OptionValue::String(s),
            other => OptionValue::Raw(other),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n.into())
    }
}

impl OptionValue {
    /// Unquoted textual form of the value.
    fn plain(&self) -> String {
        match self {
            OptionValue::Null => "null".to_string(),
            OptionValue::String(s) => s.clone(),
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Raw(v) => v.to_string(),
        }
    }
}

/// Expected shape of a known option.
#[derive(Debug, Clone, Copy)]
enum Property {
    String,
    Choice(&'static [&'static str]),
    Bool,
    Number,
    Json,
}

const TRANSITIONS: &[&str] = &["none", "fade", "slide", "convex", "concave", "zoom"];

fn property(key: &str) -> Option<Property> {
    let p = match key {
        "autoAnimateMatcher" | "autoAnimateEasing" | "autoSlideMethod" | "display"
        | "keyboardCondition" => Property::String,
        "autoAnimateStyles" => Property::Json,
        "autoPlayMedia" | "preloadIframes" | "controls" | "progress" | "center" | "hash" => {
            Property::Bool
        }
        "defaultTiming" | "autoSlide" | "viewDistance" => Property::Number,
        "backgroundTransition" | "transition" => Property::Choice(TRANSITIONS),
        "controlsLayout" => Property::Choice(&["bottom-right", "edges"]),
        "controlsBackArrows" => Property::Choice(&["faded", "hidden", "visible"]),
        "navigationMode" => Property::Choice(&["default", "linear", "grid"]),
        "showSlideNumber" => Property::Choice(&["all", "print", "speaker"]),
        "transitionSpeed" => Property::Choice(&["default", "fast", "slow"]),
        _ => return None,
    };
    Some(p)
}

fn js_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn invalid(key: &str, message: String) -> SlideError {
    SlideError::InvalidOption {
        key: key.to_string(),
        message,
    }
}

/// Render one option to the JavaScript literal placed after `key: `.
pub fn render_option(key: &str, value: &OptionValue) -> Result<String> {
    if key == "plugins" {
        return Err(invalid(
            key,
            "'revealjs.plugins' is not supported, use 'plugins' instead".to_string(),
        ));
    }
    if *value == OptionValue::Null {
        return Ok("null".to_string());
    }

    let Some(property) = property(key) else {
        return Ok(match value {
            OptionValue::String(s) => js_string(s),
            other => other.plain(),
        });
    };

    match (property, value) {
        (Property::String, v) => Ok(js_string(&v.plain())),
        (Property::Choice(valid), OptionValue::String(s)) if valid.contains(&s.as_str()) => {
            Ok(js_string(s))
        }
        (Property::Choice(valid), v) => Err(invalid(
            key,
            format!("invalid value {} (valid values: {:?})", v.plain(), valid),
        )),
        (Property::Bool, OptionValue::Bool(b)) => Ok(b.to_string()),
        (Property::Bool, v) => Err(invalid(
            key,
            format!("invalid value {}, expected boolean value", v.plain()),
        )),
        (Property::Number, OptionValue::Number(n)) => Ok(n.to_string()),
        (Property::Number, v) => Err(invalid(
            key,
            format!("invalid value {}, expected number value", v.plain()),
        )),
        (Property::Json, OptionValue::Raw(v)) => Ok(v.to_string()),
        (Property::Json, OptionValue::String(s)) => Ok(Value::String(s.clone()).to_string()),
        (Property::Json, v) => Ok(v.plain()),
    }
}
