//! Borrower feature record and its validator.
//!
//! A [`FeatureRecord`] always holds a value for every catalog feature, each
//! within its declared bounds. Records are built from a (possibly partial)
//! name -> value mapping; absent features take their declared default and
//! present values are clamped into range.

use std::collections::BTreeMap;

use serde::Serialize;

use super::feature::{self, FeatureSpec, FEATURE_CATALOG, FEATURE_COUNT};

/// Raw, unvalidated feature input keyed by feature name.
///
/// Values are kept as JSON values so that type mismatches can be reported
/// against the offending field instead of failing the whole payload.
pub type RawFeatures = BTreeMap<String, serde_json::Value>;

/// Validation failure for a single field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown feature `{field}`")]
    UnknownField { field: String },

    #[error("feature `{field}` must be numeric, got {found}")]
    NotNumeric { field: String, found: String },
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field } | Self::NotNumeric { field, .. } => field,
        }
    }
}

/// A complete, bounded set of borrower features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::defaults()
    }
}

impl FeatureRecord {
    /// Record holding every feature's declared default.
    #[must_use]
    pub fn defaults() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(FEATURE_CATALOG.iter()) {
            *slot = spec.default;
        }
        Self { values }
    }

    /// Validate and normalize a raw feature mapping.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] in alphabetical key order.
    pub fn from_raw(raw: &RawFeatures) -> Result<Self, ValidationError> {
        let mut record = Self::defaults();
        for (name, value) in raw {
            let (index, spec) = resolve(name)?;
            let number = numeric(name, value)?;
            record.values[index] = normalize_logged(spec, number);
        }
        Ok(record)
    }

    /// Like [`FeatureRecord::from_raw`], but collects every offending field.
    ///
    /// # Errors
    /// Returns all validation errors, in alphabetical key order.
    pub fn validate_all(raw: &RawFeatures) -> Result<Self, Vec<ValidationError>> {
        let mut record = Self::defaults();
        let mut errors = Vec::new();

        for (name, value) in raw {
            match resolve(name).and_then(|(index, spec)| {
                numeric(name, value).map(|number| (index, spec, number))
            }) {
                Ok((index, spec, number)) => {
                    record.values[index] = normalize_logged(spec, number);
                }
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }

    /// Parse form text for one field.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the field is unknown or the text is
    /// not a finite number.
    pub fn parse_field(name: &str, text: &str) -> Result<f64, ValidationError> {
        let (_, spec) = resolve(name)?;
        let trimmed = text.trim();
        let number: f64 = trimmed.parse().map_err(|_| ValidationError::NotNumeric {
            field: name.to_string(),
            found: format!("{trimmed:?}"),
        })?;
        if !number.is_finite() {
            return Err(ValidationError::NotNumeric {
                field: name.to_string(),
                found: trimmed.to_string(),
            });
        }
        Ok(spec.normalize(number))
    }

    /// Return a copy of this record with one feature replaced.
    ///
    /// # Errors
    /// Returns [`ValidationError`] for an unknown name or non-finite value.
    pub fn with_value(&self, name: &str, value: f64) -> Result<Self, ValidationError> {
        let (index, spec) = resolve(name)?;
        if !value.is_finite() {
            return Err(ValidationError::NotNumeric {
                field: name.to_string(),
                found: value.to_string(),
            });
        }
        let mut next = self.clone();
        next.values[index] = normalize_logged(spec, value);
        Ok(next)
    }

    /// Value of a feature by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        feature::lookup(name).map(|(index, _)| self.values[index])
    }

    /// Features in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FeatureSpec, f64)> + '_ {
        FEATURE_CATALOG.iter().zip(self.values.iter().copied())
    }

    /// Name -> value mapping, suitable for serialization.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().map(|(spec, value)| (spec.name, value)).collect()
    }

    fn by_name(&self, name: &str) -> f64 {
        // Scorer inputs are catalog constants; a miss is a programming error
        // caught by the catalog tests, so fall back to zero.
        self.get(name).unwrap_or_default()
    }

    #[must_use]
    pub fn credit_score(&self) -> f64 {
        self.by_name(feature::CREDIT_SCORE)
    }

    #[must_use]
    pub fn delinquency_count(&self) -> f64 {
        self.by_name(feature::DELINQUENCY_COUNT)
    }

    #[must_use]
    pub fn debt_to_income(&self) -> f64 {
        self.by_name(feature::DEBT_TO_INCOME)
    }

    #[must_use]
    pub fn loan_to_value(&self) -> f64 {
        self.by_name(feature::LOAN_TO_VALUE)
    }

    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.by_name(feature::TOTAL_INCOME)
    }

    #[must_use]
    pub fn revolving_utilization(&self) -> f64 {
        self.by_name(feature::REVOLVING_UTILIZATION)
    }

    #[must_use]
    pub fn payment_count(&self) -> f64 {
        self.by_name(feature::PAYMENT_COUNT)
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

fn resolve(name: &str) -> Result<(usize, &'static FeatureSpec), ValidationError> {
    feature::lookup(name).ok_or_else(|| ValidationError::UnknownField {
        field: name.to_string(),
    })
}

fn numeric(name: &str, value: &serde_json::Value) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric {
            field: name.to_string(),
            found: describe_json(value),
        })
}

fn describe_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => format!("boolean {b}"),
        serde_json::Value::Number(n) => format!("number {n}"),
        serde_json::Value::String(s) => format!("string {s:?}"),
        serde_json::Value::Array(_) => "array".to_string(),
        serde_json::Value::Object(_) => "object".to_string(),
    }
}

fn normalize_logged(spec: &FeatureSpec, value: f64) -> f64 {
    let normalized = spec.normalize(value);
    if normalized != value {
        tracing::debug!(
            feature = spec.name,
            min = spec.min,
            max = spec.max,
            "Feature value adjusted into declared range"
        );
    }
    normalized
}
