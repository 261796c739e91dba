//! Goal record
//!
//! A goal is an open JSON object. The well-known fields (`name`,
//! `targetAmount`, `currentAmount`, `deadline`) are only interpreted where
//! they are consumed; everything else is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const FIELD_NAME: &str = "name";
pub const FIELD_TARGET: &str = "targetAmount";
pub const FIELD_CURRENT: &str = "currentAmount";
pub const FIELD_DEADLINE: &str = "deadline";

/// One savings goal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(Map<String, Value>);

impl Goal {
    /// Build a goal with the four well-known fields
    pub fn new(name: &str, target: f64, current: f64, deadline: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(FIELD_NAME.to_string(), Value::from(name));
        fields.insert(FIELD_TARGET.to_string(), number(target));
        fields.insert(FIELD_CURRENT.to_string(), number(current));
        fields.insert(FIELD_DEADLINE.to_string(), Value::from(deadline));
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Display name, if the goal carries a textual one
    pub fn name(&self) -> Option<&str> {
        self.get(FIELD_NAME).and_then(Value::as_str)
    }

    pub fn target_amount(&self) -> Option<f64> {
        self.get(FIELD_TARGET).and_then(Value::as_f64)
    }

    pub fn current_amount(&self) -> Option<f64> {
        self.get(FIELD_CURRENT).and_then(Value::as_f64)
    }

    /// Progress toward the target in percent, `None` when it cannot be computed
    pub fn progress(&self) -> Option<f64> {
        let target = self.target_amount()?;
        if target == 0.0 {
            return None;
        }
        Some(self.current_amount()? / target * 100.0)
    }
}

/// Whole amounts are stored as integers so they print without a fraction
fn number(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        Value::from(amount as i64)
    } else {
        Number::from_f64(amount).map(Value::Number).unwrap_or(Value::Null)
    }
}
