//! Typed, user-editable widget parameters.
//!
//! A widget exposes its configurable state as an ordered set of descriptors. The property
//! panel renders one input per descriptor and writes raw values back, which are coerced
//! according to the descriptor's kind before they are stored.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A parameter value as it appears in documents and panel callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Integer view of the value, if it is numeric.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Float view of the value, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness: `false`, zero, NaN and the empty string are false.
    pub fn truthy(&self) -> bool {
        match self {
            ParamValue::Bool(b) => *b,
            ParamValue::Int(i) => *i != 0,
            ParamValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ParamValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Input kind of a parameter; decides coercion and which panel control is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    Integer,
    Float,
    Color,
    Text,
    MultilineText,
    SliderRange,
    Boolean,
    EnumSelect,
}

impl ParamKind {
    /// Coerce a raw panel or document value for this kind. Never fails.
    pub fn coerce(self, raw: ParamValue) -> ParamValue {
        match self {
            ParamKind::Integer => ParamValue::Int(coerce_int(&raw)),
            ParamKind::Float => ParamValue::Float(coerce_float(&raw)),
            ParamKind::Boolean => ParamValue::Bool(raw.truthy()),
            _ => raw,
        }
    }
}

fn coerce_int(raw: &ParamValue) -> i64 {
    match raw {
        ParamValue::Text(s) => parse_int_prefix(s).unwrap_or(0),
        other => other.as_i64().unwrap_or(0),
    }
}

fn coerce_float(raw: &ParamValue) -> f64 {
    let value = match raw {
        ParamValue::Text(s) => parse_float_prefix(s).unwrap_or(0.0),
        other => other.as_f64().unwrap_or(0.0),
    };
    if value.is_nan() { 0.0 } else { value }
}

/// Parse the leading integer of a string, ignoring leading whitespace and any trailing text.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the leading decimal number of a string, ignoring leading whitespace and any
/// trailing text.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// One choice of an enum-select parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: ParamValue,
    pub label: String,
}

/// Input constraints shown by the property panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Visible rows of a multi-line input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl Constraints {
    /// Hold a numeric value inside `min..=max`. Non-numeric values pass through unchanged.
    pub fn bound(&self, value: &ParamValue) -> ParamValue {
        match *value {
            ParamValue::Int(mut v) => {
                if let Some(min) = self.min {
                    v = v.max(min.ceil() as i64);
                }
                if let Some(max) = self.max {
                    v = v.min(max.floor() as i64);
                }
                ParamValue::Int(v)
            }
            ParamValue::Float(mut v) => {
                if let Some(min) = self.min {
                    v = v.max(min);
                }
                if let Some(max) = self.max {
                    v = v.min(max);
                }
                ParamValue::Float(v)
            }
            _ => value.clone(),
        }
    }
}

/// A named, typed, user-editable property of a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub kind: ParamKind,
    pub label: String,
    pub value: ParamValue,
    #[serde(default)]
    pub constraints: Constraints,
}

impl Parameter {
    pub fn new(kind: ParamKind, label: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            kind,
            label: label.into(),
            value: value.into(),
            constraints: Constraints::default(),
        }
    }

    pub fn integer(label: impl Into<String>, value: i64) -> Self {
        Self::new(ParamKind::Integer, label, value)
    }

    pub fn color(label: impl Into<String>, value: &str) -> Self {
        Self::new(ParamKind::Color, label, value)
    }

    pub fn text(label: impl Into<String>, value: &str) -> Self {
        Self::new(ParamKind::Text, label, value)
    }

    pub fn multiline(label: impl Into<String>, value: &str, rows: u32) -> Self {
        let mut param = Self::new(ParamKind::MultilineText, label, value);
        param.constraints.rows = Some(rows);
        param
    }

    pub fn slider(label: impl Into<String>, value: impl Into<ParamValue>, min: f64, max: f64, step: f64) -> Self {
        let mut param = Self::new(ParamKind::SliderRange, label, value);
        param.constraints.min = Some(min);
        param.constraints.max = Some(max);
        param.constraints.step = Some(step);
        param
    }

    pub fn boolean(label: impl Into<String>, value: bool) -> Self {
        Self::new(ParamKind::Boolean, label, value)
    }

    /// Enum-select parameter; `options` are `(value, label)` pairs.
    pub fn select<V>(label: impl Into<String>, value: impl Into<ParamValue>, options: &[(V, &str)]) -> Self
    where
        V: Clone + Into<ParamValue>,
    {
        let mut param = Self::new(ParamKind::EnumSelect, label, value);
        param.constraints.options = options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.clone().into(),
                label: label.to_string(),
            })
            .collect();
        param
    }

    /// Set the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.constraints.max_length = Some(max_length);
        self
    }
}

/// Insertion-ordered collection of a widget's parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSet {
    entries: Vec<(String, Parameter)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor. An existing descriptor with the same name is replaced in place,
    /// keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, parameter: Parameter) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = parameter,
            None => self.entries.push((name, parameter)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.entries.iter_mut().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Current value of a parameter.
    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).map(|p| &p.value)
    }

    /// Overwrite a parameter's value without coercion. Returns false for unknown names.
    pub fn set_value(&mut self, name: &str, value: ParamValue) -> bool {
        match self.get_mut(name) {
            Some(param) => {
                param.value = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name to current value for every parameter, as stored in documents.
    pub fn values(&self) -> BTreeMap<String, ParamValue> {
        self.entries
            .iter()
            .map(|(n, p)| (n.clone(), p.value.clone()))
            .collect()
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, param) in &self.entries {
            map.serialize_entry(name, param)?;
        }
        map.end()
    }
}
