//! View data rendered by templates
//!
//! A [`Value`] is the hierarchical data a template is rendered against:
//! JSON-like scalars and aggregates plus two kinds of callables.
//!
//! - [`Func`] is the zero-argument lambda marker. `Context::lookup` invokes it
//!   with the frame's own view and uses whatever it returns.
//! - [`Lambda`] is the higher-order section function a `Func` usually returns.
//!   It receives the raw section text and a callback that renders text in the
//!   current context.
//!
//! Aggregates are reference counted, so cloning a value (as the lookup memo
//! and frame pushes do) is cheap.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Object payload of a [`Value`]
pub type Map = BTreeMap<String, Value>;

/// Sub-render callback handed to a [`Lambda`]
pub type RenderFn<'a> = dyn FnMut(&str) -> Result<String> + 'a;

type FuncImpl = dyn Fn(&Value) -> Value;
type LambdaImpl = dyn Fn(&Value, &str, &mut dyn FnMut(&str) -> Result<String>) -> Result<Option<String>>;

/// Outer lambda marker, called with the view of the frame the lookup was made on
#[derive(Clone)]
pub struct Func(Rc<FuncImpl>);

impl Func {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, this: &Value) -> Value {
        (self.0)(this)
    }
}

/// Higher-order section function
#[derive(Clone)]
pub struct Lambda(Rc<LambdaImpl>);

impl Lambda {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &str, &mut dyn FnMut(&str) -> Result<String>) -> Result<Option<String>>
            + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(
        &self,
        this: &Value,
        text: &str,
        render: &mut dyn FnMut(&str) -> Result<String>,
    ) -> Result<Option<String>> {
        (self.0)(this, text, render)
    }
}

/// A view value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<Vec<Value>>),
    Object(Rc<Map>),
    Func(Func),
    Lambda(Lambda),
}

impl Value {
    /// Build an object from key/value pairs
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Rc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Build an array from items
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Wrap a zero-argument lambda marker
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Value::Func(Func::new(f))
    }

    /// Build a section lambda: a [`Func`] that hands back the given [`Lambda`]
    pub fn lambda<F>(f: F) -> Self
    where
        F: Fn(&Value, &str, &mut dyn FnMut(&str) -> Result<String>) -> Result<Option<String>>
            + 'static,
    {
        let lambda = Lambda::new(f);
        Value::func(move |_| Value::Lambda(lambda.clone()))
    }

    /// Return this object with `key` set to `value`.
    ///
    /// Non-object values are replaced by a fresh single-entry object.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = match self {
            Value::Object(map) => map,
            _ => Rc::new(Map::new()),
        };
        Rc::make_mut(&mut map).insert(key.into(), value.into());
        Value::Object(map)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness used by sections: null, false, zero, NaN and "" are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Func(_) | Value::Lambda(_) => true,
        }
    }

    pub fn is_empty_array(&self) -> bool {
        matches!(self, Value::Array(items) if items.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Type name as reported in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Func(_) | Value::Lambda(_) => "function",
        }
    }

    /// Read property `name` while descending a dotted path.
    ///
    /// Objects yield their keys; arrays and strings yield `length` and
    /// in-range indices. Everything else has no properties.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(name).cloned(),
            Value::Array(items) => {
                if name == "length" {
                    Some(Value::from(items.len()))
                } else {
                    parse_index(name).and_then(|i| items.get(i).cloned())
                }
            }
            Value::String(s) => {
                if name == "length" {
                    Some(Value::from(s.chars().count()))
                } else {
                    parse_index(name)
                        .and_then(|i| s.chars().nth(i))
                        .map(|c| Value::String(c.to_string()))
                }
            }
            _ => None,
        }
    }

    /// Whether an object-like value (object or array) carries `name`.
    ///
    /// Primitives never do, even when [`Value::get`] would find something.
    pub fn has_property(&self, name: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(name),
            Value::Array(items) => {
                name == "length" || parse_index(name).is_some_and(|i| i < items.len())
            }
            _ => false,
        }
    }

    /// Whether a primitive carries `name` as an own property (string `length` or index)
    pub fn primitive_has_own_property(&self, name: &str) -> bool {
        match self {
            Value::String(s) => {
                name == "length" || parse_index(name).is_some_and(|i| i < s.chars().count())
            }
            _ => false,
        }
    }

    /// Convert to JSON, dropping callables
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Func(_) | Value::Lambda(_) => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serde_json::Value::from(*n as i64)
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Canonical array index: digits only, no leading zero unless it is "0"
fn parse_index(name: &str) -> Option<usize> {
    let canonical = !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && (name.len() == 1 || !name.starts_with('0'));
    if canonical {
        name.parse().ok()
    } else {
        None
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else if n == 0.0 {
        // -0 prints as 0
        write!(f, "0")
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign, e.g. 1e+21 and 1.5e-7
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&formatted),
        }
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Func(_) | Value::Lambda(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Func(_) => write!(f, "Func(<fn>)"),
            Value::Lambda(_) => write!(f, "Lambda(<fn>)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(&a.0, &b.0),
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(Rc::new(map))
    }
}

impl From<Func> for Value {
    fn from(f: Func) -> Self {
        Value::Func(f)
    }
}

impl From<Lambda> for Value {
    fn from(l: Lambda) -> Self {
        Value::Lambda(l)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(Rc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Object(Rc::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}
