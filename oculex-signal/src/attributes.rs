use oculex_core::Saccade;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category tag carried with each attribute, mirroring the upstream event
/// file conventions: discrete timestamps, id-like labels, plain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Time,
    Id,
    Value,
}

/// A named per-trial attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Number(f64),
    Flag(bool),
    Saccades(Vec<Saccade>),
}

/// Named scalar/timestamp/list store for one trial.
///
/// Upstream fills it with task parameters and event timestamps; the
/// enrichment pipeline reads those and writes its derived keys back.
/// Lookups are total: a missing or differently typed key reads as None,
/// or as the caller's default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialAttributes {
    entries: HashMap<String, (AttrValue, Category)>,
}

impl TrialAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: AttrValue, category: Category) {
        self.entries.insert(name.to_string(), (value, category));
    }

    pub fn add_time(&mut self, name: &str, t_ms: f64) {
        self.add(name, AttrValue::Number(t_ms), Category::Time);
    }

    pub fn add_id(&mut self, name: &str, id: i64) {
        self.add(name, AttrValue::Number(id as f64), Category::Id);
    }

    pub fn add_value(&mut self, name: &str, value: f64) {
        self.add(name, AttrValue::Number(value), Category::Value);
    }

    pub fn add_flag(&mut self, name: &str, flag: bool) {
        self.add(name, AttrValue::Flag(flag), Category::Value);
    }

    pub fn add_saccades(&mut self, name: &str, saccades: Vec<Saccade>) {
        self.add(name, AttrValue::Saccades(saccades), Category::Value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.entries.get(name) {
            Some((AttrValue::Number(v), _)) => Some(*v),
            _ => None,
        }
    }

    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.number(name).unwrap_or(default)
    }

    /// Timestamp lookup; None for absent keys or non-time entries.
    pub fn time(&self, name: &str) -> Option<f64> {
        match self.entries.get(name) {
            Some((AttrValue::Number(v), Category::Time)) => Some(*v),
            _ => None,
        }
    }

    pub fn id(&self, name: &str) -> Option<i64> {
        match self.entries.get(name) {
            Some((AttrValue::Number(v), Category::Id)) if v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.entries.get(name) {
            Some((AttrValue::Flag(v), _)) => Some(*v),
            _ => None,
        }
    }

    pub fn saccades(&self, name: &str) -> Option<&[Saccade]> {
        match self.entries.get(name) {
            Some((AttrValue::Saccades(v), _)) => Some(v),
            _ => None,
        }
    }
}
