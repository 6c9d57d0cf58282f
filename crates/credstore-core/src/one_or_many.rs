//! # Scalar-or-List Values
//!
//! Query documents accept either a single value or an array almost
//! everywhere: `example.type`, `trustedIssuer`, `credentialQuery`, and index
//! attribute lists. [`OneOrMany`] captures both shapes as explicit variants
//! and normalizes them to a `Vec` at the boundary.

use serde::{Deserialize, Serialize};

/// Either a single `T` or a list of `T`.
///
/// Deserializes from a bare JSON value or a JSON array and serializes back
/// to the same shape. The list form is tried first so that an array is
/// never read as a single sequence-shaped `T`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A list of values. May be empty.
    Many(Vec<T>),
    /// A single value.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list. A single value becomes a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    /// Borrow the values as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// `true` only for an empty [`OneOrMany::Many`].
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Iterate over the values in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
