//! Witness Construction
//!
//! An [`Assignment`] is the user-facing, curve-agnostic list of named input
//! values. A [`Witness`] is that list checked against a constraint system and
//! converted into field elements, in wire order.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::constraint::ConstraintSystem;
use crate::error::{Error, Result};
use crate::field::{from_biguint, ScalarField};

/// Whether an input is revealed to the verifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Secret,
}

/// One named input value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedValue {
    pub name: String,
    pub visibility: Visibility,
    #[serde(with = "biguint_string")]
    pub value: BigUint,
}

/// Ordered input values for a circuit.
///
/// JSON form:
/// ```json
/// [
///   { "name": "y", "visibility": "public", "value": "35" },
///   { "name": "x", "visibility": "secret", "value": "0x03" }
/// ]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pub entries: Vec<AssignedValue>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a public value
    pub fn public(mut self, name: &str, value: impl Into<BigUint>) -> Self {
        self.entries.push(AssignedValue {
            name: name.to_string(),
            visibility: Visibility::Public,
            value: value.into(),
        });
        self
    }

    /// Append a secret value
    pub fn secret(mut self, name: &str, value: impl Into<BigUint>) -> Self {
        self.entries.push(AssignedValue {
            name: name.to_string(),
            visibility: Visibility::Secret,
            value: value.into(),
        });
        self
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedData(e.to_string()))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::MalformedData(e.to_string()))
    }

    /// The entries with the given visibility, in order
    pub fn filter(&self, visibility: Visibility) -> impl Iterator<Item = &AssignedValue> {
        self.entries
            .iter()
            .filter(move |e| e.visibility == visibility)
    }
}

/// Input values in wire order.
///
/// The first `nb_public` values are the public inputs. A public witness holds
/// only those; a full witness continues with the secret inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F> {
    pub(crate) nb_public: usize,
    pub(crate) values: Vec<F>,
}

impl<F: ScalarField> Witness<F> {
    /// Extract the public inputs of `assignment`.
    ///
    /// Secret entries are ignored, so a full assignment may be passed.
    pub fn from_public_assignment(cs: &ConstraintSystem<F>, assignment: &Assignment) -> Result<Self> {
        let values = match_names(&cs.public_names, assignment.filter(Visibility::Public), "public")?;
        Ok(Witness {
            nb_public: values.len(),
            values,
        })
    }

    /// Extract all inputs of `assignment`: public ones first, then secret ones.
    pub fn from_full_assignment(cs: &ConstraintSystem<F>, assignment: &Assignment) -> Result<Self> {
        let mut values: Vec<F> =
            match_names(&cs.public_names, assignment.filter(Visibility::Public), "public")?;
        let nb_public = values.len();
        let secret: Vec<F> = match_names(
            &cs.secret_names,
            assignment.filter(Visibility::Secret),
            "secret",
        )?;
        values.extend(secret);
        Ok(Witness { nb_public, values })
    }

    /// Number of public inputs
    pub fn nb_public(&self) -> usize {
        self.nb_public
    }

    /// All values in wire order
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// The public part
    pub fn public(&self) -> &[F] {
        &self.values[..self.nb_public]
    }

    /// Keep only the public part
    pub fn to_public(&self) -> Self {
        Witness {
            nb_public: self.nb_public,
            values: self.public().to_vec(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.values.len() == self.nb_public
    }
}

fn match_names<'a, F: ScalarField>(
    expected: &[String],
    entries: impl Iterator<Item = &'a AssignedValue>,
    kind: &str,
) -> Result<Vec<F>> {
    let entries: Vec<&AssignedValue> = entries.collect();
    if entries.len() != expected.len() {
        return Err(Error::AssignmentMismatch(format!(
            "expected {} {} values, got {}",
            expected.len(),
            kind,
            entries.len()
        )));
    }

    expected
        .iter()
        .zip(entries)
        .enumerate()
        .map(|(i, (name, entry))| {
            if *name != entry.name {
                return Err(Error::AssignmentMismatch(format!(
                    "{} value {} should be `{}`, found `{}`",
                    kind, i, name, entry.name
                )));
            }
            from_biguint(&entry.value).ok_or_else(|| {
                Error::AssignmentMismatch(format!(
                    "value of `{}` is not below the field modulus",
                    entry.name
                ))
            })
        })
        .collect()
}

/// Values as decimal strings; input also accepts `0x` hex strings and
/// plain JSON integers.
mod biguint_string {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Str(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(BigUint::from(v)),
            Repr::Str(s) => match s.strip_prefix("0x") {
                Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
                None => BigUint::parse_bytes(s.as_bytes(), 10),
            }
            .ok_or_else(|| D::Error::custom(format!("invalid integer `{}`", s))),
        }
    }
}
