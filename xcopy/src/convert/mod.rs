//! Scalar conversion between primitive kinds.
//!
//! The engine routes every scalar write and every mapping key through a
//! [`Converter`], so callers can swap in stricter or looser rules without
//! touching the copy machinery.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ty::{ScalarKind, Type, TypeKind},
    value::{Data, Value, data_label},
};

/// Failure to convert a scalar value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot convert {from} to {to}: {reason}")]
pub struct ConvertError {
    /// Rendered source type.
    pub from: String,
    /// Rendered target type.
    pub to: String,
    /// Why the conversion failed.
    pub reason: String,
}

impl ConvertError {
    /// Describes a failed conversion of `value` into `target`.
    #[must_use]
    pub fn new(value: &Value, target: &Type, reason: impl Into<String>) -> Self {
        Self {
            from: value.ty().to_string(),
            to: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Converts scalar values into scalar or optional-scalar types.
pub trait Converter: fmt::Debug + Send + Sync {
    /// Converts `value` into a value of type `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the value cannot be represented in
    /// `target`.
    fn convert(&self, value: &Value, target: &Type) -> Result<Value, ConvertError>;

    /// Renders a scalar value as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the value is nil or not a scalar.
    fn to_string(&self, value: &Value) -> Result<String, ConvertError> {
        let converted = self.convert(value, &Type::string())?;
        converted
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ConvertError::new(value, &Type::string(), "converter returned a non-string"))
    }
}

/// Tuning knobs for [`ScalarConverter`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Fail instead of truncating floats with a fractional part into
    /// integers.
    pub reject_fractional_floats: bool,
    /// Treat an empty string as the zero value of numeric and boolean
    /// targets.
    pub empty_string_as_zero: bool,
}

/// Default [`Converter`].
///
/// Numbers convert between kinds with range checks, booleans map to `0` and
/// `1`, strings are parsed and rendered in their natural decimal form, and
/// `any` targets receive the source value boxed unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarConverter {
    options: ConvertOptions,
}

impl ScalarConverter {
    /// A converter using `options`.
    #[must_use]
    pub const fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> ConvertOptions {
        self.options
    }

    fn scalar(&self, source: &Value, kind: ScalarKind, target: &Type) -> Result<Value, ConvertError> {
        let fail = |reason: &str| ConvertError::new(source, target, reason);
        let data = match source.data() {
            Data::Bool(b) => from_bool(*b, kind),
            Data::Int(n) => from_integer(i128::from(*n), kind).ok_or_else(|| fail("out of range"))?,
            Data::Uint(n) => from_integer(i128::from(*n), kind).ok_or_else(|| fail("out of range"))?,
            Data::Float(n) => self.float_into(*n, source.ty(), kind).map_err(fail)?,
            Data::Str(s) => self.parse_into(s, kind).map_err(|reason| fail(&reason))?,
            other => return Err(fail(&format!("{} is not a scalar", data_label(other)))),
        };
        Ok(Value::new_unchecked(target.clone(), data))
    }

    fn float_into(&self, n: f64, source_ty: &Type, kind: ScalarKind) -> Result<Data, &'static str> {
        match kind {
            ScalarKind::Bool => Ok(Data::Bool(n != 0.0)),
            ScalarKind::F32 => Ok(Data::Float(f64::from(n as f32))),
            ScalarKind::F64 => Ok(Data::Float(n)),
            ScalarKind::String => {
                let rendered = if source_ty.scalar_kind() == Some(ScalarKind::F32) {
                    (n as f32).to_string()
                } else {
                    n.to_string()
                };
                Ok(Data::Str(rendered))
            }
            _ if !n.is_finite() => Err("not a finite number"),
            _ if self.options.reject_fractional_floats && n.fract() != 0.0 => {
                Err("has a fractional part")
            }
            // the float-to-int cast saturates; range is checked afterwards
            _ => from_integer(n.trunc() as i128, kind).ok_or("out of range"),
        }
    }

    fn parse_into(&self, s: &str, kind: ScalarKind) -> Result<Data, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() && self.options.empty_string_as_zero && kind != ScalarKind::String {
            return Ok(zero_data(kind));
        }
        match kind {
            ScalarKind::String => Ok(Data::Str(s.to_owned())),
            ScalarKind::Bool => parse_bool(trimmed).ok_or_else(|| format!("{s:?} is not a boolean")),
            ScalarKind::F32 => trimmed
                .parse::<f32>()
                .map(|n| Data::Float(f64::from(n)))
                .map_err(|e| e.to_string()),
            ScalarKind::F64 => trimmed
                .parse::<f64>()
                .map(Data::Float)
                .map_err(|e| e.to_string()),
            ScalarKind::Any => Err("string cannot become any".to_owned()),
            _ => {
                let parsed = trimmed.parse::<i128>().map_err(|e| e.to_string())?;
                from_integer(parsed, kind).ok_or_else(|| "out of range".to_owned())
            }
        }
    }
}

impl Converter for ScalarConverter {
    fn convert(&self, value: &Value, target: &Type) -> Result<Value, ConvertError> {
        match target.kind() {
            TypeKind::Scalar(ScalarKind::Any) => Ok(Value::any_of(target, value.clone())),
            TypeKind::Option(inner) => match value.resolve() {
                None => Ok(Value::zero(target)),
                Some(resolved) => Ok(Value::option_of(target, self.convert(resolved, inner)?)),
            },
            TypeKind::Scalar(kind) => {
                let resolved = value
                    .resolve()
                    .ok_or_else(|| ConvertError::new(value, target, "value is nil"))?;
                self.scalar(resolved, *kind, target)
            }
            _ => Err(ConvertError::new(value, target, "target is not a scalar")),
        }
    }
}

const fn zero_data(kind: ScalarKind) -> Data {
    match kind {
        ScalarKind::Bool => Data::Bool(false),
        ScalarKind::F32 | ScalarKind::F64 => Data::Float(0.0),
        ScalarKind::String => Data::Str(String::new()),
        ScalarKind::Any => Data::Any(None),
        kind if kind.is_unsigned() => Data::Uint(0),
        _ => Data::Int(0),
    }
}

fn parse_bool(s: &str) -> Option<Data> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(Data::Bool(true)),
        "false" | "f" | "0" => Some(Data::Bool(false)),
        _ => None,
    }
}

fn from_bool(b: bool, kind: ScalarKind) -> Data {
    match kind {
        ScalarKind::Bool => Data::Bool(b),
        ScalarKind::String => Data::Str(b.to_string()),
        _ => from_integer(i128::from(u8::from(b)), kind).unwrap_or(Data::Bool(b)),
    }
}

fn from_integer(n: i128, kind: ScalarKind) -> Option<Data> {
    let signed = |min: i128, max: i128| (min..=max).contains(&n).then_some(Data::Int(n as i64));
    let unsigned = |max: u128| (0..=max as i128).contains(&n).then_some(Data::Uint(n as u64));
    match kind {
        ScalarKind::Bool => Some(Data::Bool(n != 0)),
        ScalarKind::I8 => signed(i8::MIN.into(), i8::MAX.into()),
        ScalarKind::I16 => signed(i16::MIN.into(), i16::MAX.into()),
        ScalarKind::I32 => signed(i32::MIN.into(), i32::MAX.into()),
        ScalarKind::I64 => signed(i64::MIN.into(), i64::MAX.into()),
        ScalarKind::U8 => unsigned(u8::MAX.into()),
        ScalarKind::U16 => unsigned(u16::MAX.into()),
        ScalarKind::U32 => unsigned(u32::MAX.into()),
        ScalarKind::U64 => unsigned(u64::MAX.into()),
        ScalarKind::F32 | ScalarKind::F64 => Some(Data::Float(n as f64)),
        ScalarKind::String => Some(Data::Str(n.to_string())),
        ScalarKind::Any => None,
    }
}
