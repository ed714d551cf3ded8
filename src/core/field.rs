//! Typed structured fields
//!
//! A [`Field`] pairs a key with a [`FieldValue`]. The value enum is closed:
//! every semantic category a caller can attach (strings, the integer and
//! float widths, booleans, timestamps, durations, errors, nested objects,
//! pre-rendered `Display` values, and a serde-backed catch-all) has its own
//! variant, and the encoders decide how each one is rendered.
//!
//! None of the constructors can fail.
//!
//! ```
//! use rust_logger_facade::Field;
//! use std::time::Duration;
//!
//! let fields = [
//!     Field::string("user", "alice"),
//!     Field::int64("bytes", 4096),
//!     Field::duration("elapsed", Duration::from_millis(12)),
//! ];
//! assert_eq!(fields[1].key(), "bytes");
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

/// Key used by [`Field::error`]
pub const DEFAULT_ERROR_KEY: &str = "error";

/// Rendered error: its message plus the messages of its `source()` chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
    chain: Vec<String>,
}

impl ErrorValue {
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            chain,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// `"outer: cause: root cause"`, or `None` when there is no source chain
    pub fn verbose(&self) -> Option<String> {
        if self.chain.is_empty() {
            return None;
        }
        let mut verbose = self.message.clone();
        for cause in &self.chain {
            verbose.push_str(": ");
            verbose.push_str(cause);
        }
        Some(verbose)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    Duration(Duration),
    Error(ErrorValue),
    Errors(Vec<ErrorValue>),
    Object(Vec<Field>),
    Stringer(String),
    /// Serialized form of an arbitrary `Serialize` value
    Reflected(serde_json::Value),
    /// Omitted from output
    Skip,
}

/// Type tag of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    Time,
    Duration,
    Error,
    Errors,
    Object,
    Stringer,
    Reflected,
    Skip,
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Int8(_) => FieldType::Int8,
            FieldValue::Int16(_) => FieldType::Int16,
            FieldValue::Int32(_) => FieldType::Int32,
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::Float32(_) => FieldType::Float32,
            FieldValue::Float64(_) => FieldType::Float64,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Time(_) => FieldType::Time,
            FieldValue::Duration(_) => FieldType::Duration,
            FieldValue::Error(_) => FieldType::Error,
            FieldValue::Errors(_) => FieldType::Errors,
            FieldValue::Object(_) => FieldType::Object,
            FieldValue::Stringer(_) => FieldType::Stringer,
            FieldValue::Reflected(_) => FieldType::Reflected,
            FieldValue::Skip => FieldType::Skip,
        }
    }

    /// Map a JSON value onto the closest typed variant
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => FieldValue::Int64(i),
                (None, Some(f)) if n.is_f64() => FieldValue::Float64(f),
                _ => FieldValue::Reflected(serde_json::Value::Number(n)),
            },
            other => FieldValue::Reflected(other),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Stringer(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Int8(i) => write!(f, "{}", i),
            FieldValue::Int16(i) => write!(f, "{}", i),
            FieldValue::Int32(i) => write!(f, "{}", i),
            FieldValue::Int64(i) => write!(f, "{}", i),
            FieldValue::Float32(fl) => write!(f, "{}", fl),
            FieldValue::Float64(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Errors(errs) => {
                let rendered: Vec<&str> = errs.iter().map(ErrorValue::message).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            FieldValue::Object(fields) => {
                let rendered: Vec<String> = fields
                    .iter()
                    .filter(|field| !field.is_skip())
                    .map(ToString::to_string)
                    .collect();
                write!(f, "{{{}}}", rendered.join(" "))
            }
            FieldValue::Reflected(v) => write!(f, "{}", v),
            FieldValue::Skip => Ok(()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int64(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int32(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float64(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

/// An immutable key/value pair attached to a log record
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn field_type(&self) -> FieldType {
        self.value.field_type()
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.value, FieldValue::Skip)
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: isize) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn int8(key: impl Into<String>, value: i8) -> Self {
        Self::new(key, FieldValue::Int8(value))
    }

    pub fn int16(key: impl Into<String>, value: i16) -> Self {
        Self::new(key, FieldValue::Int16(value))
    }

    pub fn int32(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, FieldValue::Int32(value))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int64(value))
    }

    pub fn float32(key: impl Into<String>, value: f32) -> Self {
        Self::new(key, FieldValue::Float32(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    /// Accepts `DateTime<Utc>` or `SystemTime`
    pub fn time(key: impl Into<String>, value: impl Into<DateTime<Utc>>) -> Self {
        Self::new(key, FieldValue::Time(value.into()))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    /// Error under the conventional `"error"` key
    pub fn error<E: StdError + ?Sized>(err: &E) -> Self {
        Self::named_error(DEFAULT_ERROR_KEY, err)
    }

    pub fn named_error<E: StdError + ?Sized>(key: impl Into<String>, err: &E) -> Self {
        Self::new(key, FieldValue::Error(ErrorValue::from_error(err)))
    }

    /// `None` produces a skipped field rather than an empty error
    pub fn optional_error<E: StdError + ?Sized>(err: Option<&E>) -> Self {
        match err {
            Some(err) => Self::error(err),
            None => Self::skip(),
        }
    }

    /// List of errors; pass `errs.iter().map(|e| &**e)` for boxed errors
    pub fn errors<'a, I, E>(key: impl Into<String>, errs: I) -> Self
    where
        I: IntoIterator<Item = &'a E>,
        E: StdError + ?Sized + 'a,
    {
        let values = errs.into_iter().map(ErrorValue::from_error).collect();
        Self::new(key, FieldValue::Errors(values))
    }

    pub fn object<O: ObjectMarshaler + ?Sized>(key: impl Into<String>, value: &O) -> Self {
        let mut encoder = ObjectEncoder::new();
        value.marshal_log_object(&mut encoder);
        Self::new(key, FieldValue::Object(encoder.into_fields()))
    }

    /// Renders `value` with its `Display` impl at construction time
    pub fn stringer<S: fmt::Display + ?Sized>(key: impl Into<String>, value: &S) -> Self {
        Self::new(key, FieldValue::Stringer(value.to_string()))
    }

    /// Catch-all for any `Serialize` value
    ///
    /// If serialization fails the field is re-keyed to `"<key>Error"` and
    /// carries the serializer's message instead.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => Self::new(key, FieldValue::Reflected(json)),
            Err(e) => Self::new(format!("{}Error", key), FieldValue::String(e.to_string())),
        }
    }

    /// A field that encoders omit
    pub fn skip() -> Self {
        Self::new(String::new(), FieldValue::Skip)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Types that know how to describe themselves as a nested set of fields
///
/// ```
/// use rust_logger_facade::{Field, ObjectEncoder, ObjectMarshaler};
///
/// struct Request {
///     method: &'static str,
///     status: u16,
/// }
///
/// impl ObjectMarshaler for Request {
///     fn marshal_log_object(&self, enc: &mut ObjectEncoder) {
///         enc.add_string("method", self.method);
///         enc.add_int64("status", i64::from(self.status));
///     }
/// }
///
/// let field = Field::object("request", &Request { method: "GET", status: 200 });
/// assert_eq!(field.to_string(), "request={method=GET status=200}");
/// ```
pub trait ObjectMarshaler {
    fn marshal_log_object(&self, enc: &mut ObjectEncoder);
}

/// Collects the fields of an [`ObjectMarshaler`]
#[derive(Debug, Default)]
pub struct ObjectEncoder {
    fields: Vec<Field>,
}

impl ObjectEncoder {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.add_field(Field::string(key, value));
    }

    pub fn add_int64(&mut self, key: impl Into<String>, value: i64) {
        self.add_field(Field::int64(key, value));
    }

    pub fn add_float64(&mut self, key: impl Into<String>, value: f64) {
        self.add_field(Field::float64(key, value));
    }

    pub fn add_bool(&mut self, key: impl Into<String>, value: bool) {
        self.add_field(Field::bool(key, value));
    }

    pub fn add_duration(&mut self, key: impl Into<String>, value: Duration) {
        self.add_field(Field::duration(key, value));
    }

    pub fn add_object<O: ObjectMarshaler + ?Sized>(&mut self, key: impl Into<String>, value: &O) {
        self.add_field(Field::object(key, value));
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl<T: ObjectMarshaler + ?Sized> ObjectMarshaler for &T {
    fn marshal_log_object(&self, enc: &mut ObjectEncoder) {
        (**self).marshal_log_object(enc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct Wrapped {
        inner: std::io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load profile")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_constructor_type_tags() {
        assert_eq!(Field::string("k", "v").field_type(), FieldType::String);
        assert_eq!(Field::int("k", 1).field_type(), FieldType::Int);
        assert_eq!(Field::int8("k", 1).field_type(), FieldType::Int8);
        assert_eq!(Field::int16("k", 1).field_type(), FieldType::Int16);
        assert_eq!(Field::int32("k", 1).field_type(), FieldType::Int32);
        assert_eq!(Field::int64("k", 1).field_type(), FieldType::Int64);
        assert_eq!(Field::float32("k", 1.0).field_type(), FieldType::Float32);
        assert_eq!(Field::float64("k", 1.0).field_type(), FieldType::Float64);
        assert_eq!(Field::bool("k", true).field_type(), FieldType::Bool);
        assert_eq!(Field::time("k", Utc::now()).field_type(), FieldType::Time);
        assert_eq!(
            Field::duration("k", Duration::from_secs(1)).field_type(),
            FieldType::Duration
        );
        assert_eq!(Field::stringer("k", &42).field_type(), FieldType::Stringer);
        assert_eq!(Field::any("k", &vec![1, 2]).field_type(), FieldType::Reflected);
        assert_eq!(Field::skip().field_type(), FieldType::Skip);
    }

    #[test]
    fn test_string_field() {
        let field = Field::string("k", "v");
        assert_eq!(field.key(), "k");
        assert_eq!(field.value(), &FieldValue::String("v".to_string()));
        assert_eq!(field.to_string(), "k=v");
    }

    #[test]
    fn test_error_field_default_key() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let field = Field::error(&err);

        assert_eq!(field.key(), DEFAULT_ERROR_KEY);
        match field.value() {
            FieldValue::Error(value) => {
                assert_eq!(value.message(), "no such file");
                assert!(value.verbose().is_none());
            }
            other => panic!("Expected error value, got {:?}", other),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let err = Wrapped {
            inner: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let value = ErrorValue::from_error(&err);

        assert_eq!(value.chain(), ["access denied".to_string()]);
        assert_eq!(
            value.verbose().as_deref(),
            Some("failed to load profile: access denied")
        );
    }

    #[test]
    fn test_optional_error_none_is_skipped() {
        let field = Field::optional_error::<std::io::Error>(None);
        assert!(field.is_skip());

        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(Field::optional_error(Some(&err)).field_type(), FieldType::Error);
    }

    #[test]
    fn test_errors_field_from_boxed() {
        let errs: Vec<Box<dyn StdError + Send + Sync>> = vec!["first".into(), "second".into()];
        let field = Field::errors("failures", errs.iter().map(|e| &**e));

        assert_eq!(field.to_string(), "failures=[first, second]");
    }

    #[test]
    fn test_object_field() {
        struct Point {
            x: i64,
            y: i64,
        }

        impl ObjectMarshaler for Point {
            fn marshal_log_object(&self, enc: &mut ObjectEncoder) {
                enc.add_int64("x", self.x);
                enc.add_int64("y", self.y);
            }
        }

        let field = Field::object("point", &Point { x: 3, y: -4 });
        match field.value() {
            FieldValue::Object(fields) => assert_eq!(fields.len(), 2),
            other => panic!("Expected object, got {:?}", other),
        }
        assert_eq!(field.to_string(), "point={x=3 y=-4}");
    }

    #[test]
    fn test_any_serializes_value() {
        let mut map = BTreeMap::new();
        map.insert("region", "eu-west-1");
        let field = Field::any("tags", &map);

        assert_eq!(
            field.value(),
            &FieldValue::Reflected(serde_json::json!({"region": "eu-west-1"}))
        );
    }

    #[test]
    fn test_any_serialization_failure_rekeys() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cannot encode"))
            }
        }

        let field = Field::any("payload", &Broken);
        assert_eq!(field.key(), "payloadError");
        assert_eq!(field.value(), &FieldValue::String("cannot encode".to_string()));
    }

    #[test]
    fn test_from_json_mapping() {
        assert_eq!(
            FieldValue::from_json(serde_json::json!("api")),
            FieldValue::String("api".to_string())
        );
        assert_eq!(FieldValue::from_json(serde_json::json!(7)), FieldValue::Int64(7));
        assert_eq!(FieldValue::from_json(serde_json::json!(0.5)), FieldValue::Float64(0.5));
        assert_eq!(
            FieldValue::from_json(serde_json::json!([1, 2])).field_type(),
            FieldType::Reflected
        );
    }
}
