//! Typed attributes.
//!
//! An [`Attribute`] is one of the four value types the item protocol knows
//! about: a string, a number, a string set or a number set. Native values
//! enter through [`Value`] and are normalized once, at construction:
//!
//! - numbers are canonicalized (`"007"` becomes `7`, `"1.50"` becomes `1.5`);
//! - sets are sorted ascending and deduplicated;
//! - without an explicit [`AttributeType`], the type is inferred from the
//!   shape of the value.

use std::cmp::Ordering;
use std::fmt;

use dynomap_model::AttributeValue;
use serde_json::Value as Json;

use crate::error::ConstructionError;

/// The four attribute types of the item protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// `S`
    String,
    /// `N`
    Number,
    /// `SS`
    StringSet,
    /// `NS`
    NumberSet,
}

impl AttributeType {
    /// The wire type tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::StringSet => "SS",
            Self::NumberSet => "NS",
        }
    }

    /// Whether this is one of the set types.
    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::StringSet | Self::NumberSet)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// A canonical numeric value.
///
/// Integral values that fit in an `i64` are always stored as [`Number::Int`],
/// so `1`, `"1.0"` and `1e0` compare equal and render as `1`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// An integer.
    Int(i64),
    /// A finite, non-integral (or out of `i64` range) float.
    Float(f64),
}

impl Number {
    /// Parse a numeric-looking string.
    ///
    /// Surrounding ASCII whitespace is ignored. Accepts integers and decimal
    /// floats with an optional sign and exponent; rejects `inf`, `nan`, hex
    /// and anything else `f64::from_str` would tolerate beyond plain digits.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim_matches(|c: char| c.is_ascii_whitespace());
        if let Ok(i) = s.parse::<i64>() {
            return Some(Self::Int(i));
        }
        let decimal = s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
        if !decimal || !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<f64>().ok().and_then(Self::from_f64)
    }

    /// Canonicalize a float. Returns `None` for `inf` and `NaN`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(Self::Int(f as i64))
        } else {
            Some(Self::Float(f))
        }
    }

    /// Convert a JSON number.
    #[must_use]
    pub fn from_json(n: &serde_json::Number) -> Option<Self> {
        n.as_i64()
            .map(Self::Int)
            .or_else(|| n.as_f64().and_then(Self::from_f64))
    }

    /// The value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).reverse(),
        }
    }
}

/// Compares without widening the integer to `f64`, which would merge
/// neighbouring integers near the ends of the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // -2^63 and 2^63 are exact in f64.
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    const UPPER: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() || f >= UPPER {
        return Ordering::Less;
    }
    if f < LOWER {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64))
        .then_with(|| 0.0_f64.total_cmp(&(f - whole)))
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// Input accepted wherever an attribute is expected.
///
/// Raw JSON is normalized into an [`Attribute`]; an already typed attribute
/// is taken as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A native value still to be typed.
    Raw(Json),
    /// A constructed attribute.
    Typed(Attribute),
}

impl From<Json> for Value {
    fn from(v: Json) -> Self {
        Self::Raw(v)
    }
}

impl From<Attribute> for Value {
    fn from(a: Attribute) -> Self {
        Self::Typed(a)
    }
}

impl From<&Attribute> for Value {
    fn from(a: &Attribute) -> Self {
        Self::Typed(a.clone())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Raw(Json::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Raw(Json::from(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Raw(Json::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Raw(Json::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Raw(Json::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Raw(Json::from(n))
    }
}

impl<T: Into<Json>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Raw(Json::from(v))
    }
}

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    String(String),
    Number(Number),
    StringSet(Vec<String>),
    NumberSet(Vec<Number>),
}

/// A typed, immutable attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute(Repr);

impl Attribute {
    /// Build an attribute, inferring its type.
    ///
    /// - an array whose members are all numeric becomes a number set;
    /// - an array with any non-numeric member becomes a string set;
    /// - a numeric-looking scalar becomes a number;
    /// - any other string stays a string.
    pub fn new(value: impl Into<Value>) -> Result<Self, ConstructionError> {
        match value.into() {
            Value::Typed(attr) => Ok(attr),
            Value::Raw(raw) => infer(raw).map(Self),
        }
    }

    /// Build an attribute of an explicit type.
    ///
    /// Strings accept any scalar. Numbers need a numeric-looking scalar.
    /// Sets accept an array or a single scalar, promoted to a one-member set.
    pub fn with_type(
        value: impl Into<Value>,
        ty: AttributeType,
    ) -> Result<Self, ConstructionError> {
        match value.into() {
            Value::Typed(attr) if attr.kind() == ty => Ok(attr),
            Value::Typed(attr) => Err(ConstructionError::TypeMismatch {
                expected: ty.as_str(),
                found: attr.kind().as_str(),
            }),
            Value::Raw(raw) => coerce(raw, ty).map(Self),
        }
    }

    /// A string attribute, never reinterpreted as a number.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self(Repr::String(s.into()))
    }

    /// A number attribute.
    #[must_use]
    pub fn number(n: Number) -> Self {
        Self(Repr::Number(n))
    }

    /// The attribute type.
    #[must_use]
    pub fn kind(&self) -> AttributeType {
        match &self.0 {
            Repr::String(_) => AttributeType::String,
            Repr::Number(_) => AttributeType::Number,
            Repr::StringSet(_) => AttributeType::StringSet,
            Repr::NumberSet(_) => AttributeType::NumberSet,
        }
    }

    /// Whether this attribute is a set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.kind().is_set()
    }

    /// The string value of a string attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.0 {
            Repr::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value of a number attribute.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match &self.0 {
            Repr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is an empty string, which the protocol does not store.
    #[must_use]
    pub fn is_empty_string(&self) -> bool {
        matches!(&self.0, Repr::String(s) if s.is_empty())
    }

    /// Iterate over the members of a set, in sorted order.
    pub fn iter(&self) -> Result<Members<'_>, ConstructionError> {
        match &self.0 {
            Repr::StringSet(v) => Ok(Members(MembersInner::Strings(v.iter()))),
            Repr::NumberSet(v) => Ok(Members(MembersInner::Numbers(v.iter()))),
            _ => Err(ConstructionError::NotIterable(self.kind().as_str())),
        }
    }

    /// Render to the wire representation.
    #[must_use]
    pub fn to_wire(&self) -> AttributeValue {
        match &self.0 {
            Repr::String(s) => AttributeValue::S(s.clone()),
            Repr::Number(n) => AttributeValue::N(n.to_string()),
            Repr::StringSet(v) => AttributeValue::Ss(v.clone()),
            Repr::NumberSet(v) => AttributeValue::Ns(v.iter().map(ToString::to_string).collect()),
        }
    }

    /// Decode a wire value using its declared type tag.
    ///
    /// String payloads are never reinterpreted as numbers.
    pub fn from_wire(value: &AttributeValue) -> Result<Self, ConstructionError> {
        let wire_number = |s: &String| {
            Number::parse(s).ok_or_else(|| ConstructionError::InvalidWireValue(format!("N {s:?}")))
        };
        let repr = match value {
            AttributeValue::S(s) => Repr::String(s.clone()),
            AttributeValue::N(n) => Repr::Number(wire_number(n)?),
            AttributeValue::Ss(v) => Repr::StringSet(sorted(v.clone())),
            AttributeValue::Ns(v) => {
                Repr::NumberSet(sorted(v.iter().map(wire_number).collect::<Result<_, _>>()?))
            }
        };
        Ok(Self(repr))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::String(s) => f.write_str(s),
            Repr::Number(n) => write!(f, "{n}"),
            Repr::StringSet(v) => f.write_str(&v.join(",")),
            Repr::NumberSet(v) => {
                let parts: Vec<String> = v.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

/// Iterator over the members of a set attribute.
#[derive(Debug, Clone)]
pub struct Members<'a>(MembersInner<'a>);

#[derive(Debug, Clone)]
enum MembersInner<'a> {
    Strings(std::slice::Iter<'a, String>),
    Numbers(std::slice::Iter<'a, Number>),
}

impl Iterator for Members<'_> {
    type Item = Attribute;

    fn next(&mut self) -> Option<Attribute> {
        match &mut self.0 {
            MembersInner::Strings(it) => it.next().map(|s| Attribute(Repr::String(s.clone()))),
            MembersInner::Numbers(it) => it.next().map(|n| Attribute(Repr::Number(*n))),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn sorted<T: Ord>(mut members: Vec<T>) -> Vec<T> {
    members.sort();
    members.dedup();
    members
}

fn describe(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn numeric(v: &Json) -> Option<Number> {
    match v {
        Json::Number(n) => Number::from_json(n),
        Json::String(s) => Number::parse(s),
        _ => None,
    }
}

fn text(v: &Json) -> Option<String> {
    match v {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => {
            Some(Number::from_json(n).map_or_else(|| n.to_string(), |n| n.to_string()))
        }
        _ => None,
    }
}

/// Set members: an array of scalars, or one scalar promoted to a set.
fn members(raw: Json) -> Result<Vec<Json>, ConstructionError> {
    let members = match raw {
        Json::Array(members) => members,
        scalar => vec![scalar],
    };
    if members.is_empty() {
        return Err(ConstructionError::InvalidValue("empty set".to_owned()));
    }
    if let Some(bad) = members
        .iter()
        .find(|m| !matches!(m, Json::String(_) | Json::Number(_)))
    {
        return Err(ConstructionError::InvalidValue(format!(
            "set member of type {}",
            describe(bad)
        )));
    }
    Ok(members)
}

fn infer(raw: Json) -> Result<Repr, ConstructionError> {
    match raw {
        Json::Array(_) => {
            let members = members(raw)?;
            match members.iter().map(numeric).collect::<Option<Vec<_>>>() {
                Some(numbers) => Ok(Repr::NumberSet(sorted(numbers))),
                None => Ok(Repr::StringSet(sorted(
                    members.iter().filter_map(text).collect(),
                ))),
            }
        }
        Json::Number(n) => Number::from_json(&n)
            .map(Repr::Number)
            .ok_or_else(|| ConstructionError::InvalidNumber(n.to_string())),
        Json::String(s) => Ok(Number::parse(&s).map_or(Repr::String(s), Repr::Number)),
        other => Err(ConstructionError::InvalidValue(describe(&other).to_owned())),
    }
}

fn coerce(raw: Json, ty: AttributeType) -> Result<Repr, ConstructionError> {
    match ty {
        AttributeType::String | AttributeType::Number
            if !matches!(raw, Json::String(_) | Json::Number(_)) =>
        {
            Err(ConstructionError::InvalidValue(format!(
                "{} for type {ty}",
                describe(&raw)
            )))
        }
        AttributeType::String => text(&raw)
            .map(Repr::String)
            .ok_or_else(|| ConstructionError::InvalidValue(describe(&raw).to_owned())),
        AttributeType::Number => numeric(&raw)
            .map(Repr::Number)
            .ok_or_else(|| ConstructionError::InvalidNumber(text(&raw).unwrap_or_default())),
        AttributeType::StringSet => {
            let members = members(raw)?;
            Ok(Repr::StringSet(sorted(members.iter().filter_map(text).collect())))
        }
        AttributeType::NumberSet => {
            let numbers = members(raw)?
                .iter()
                .map(|m| {
                    numeric(m).ok_or_else(|| {
                        ConstructionError::InvalidNumber(text(m).unwrap_or_default())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Repr::NumberSet(sorted(numbers)))
        }
    }
}
