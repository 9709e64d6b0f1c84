//! Typed route parameters.
//!
//! A route declares each of its arguments with a [`ParamSpec`]. Raw strings
//! captured from a path, a deep link or a caller-supplied map are converted
//! with [`ParamType::coerce`], and resolved values are read back as Rust
//! types through [`FromArgument`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Declared type of a route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
	/// UTF-8 text.
	String,
	/// 32-bit signed integer.
	Int,
	/// 64-bit signed integer.
	Long,
	/// 64-bit float.
	Float,
	/// `true` or `false`.
	Bool,
}

impl ParamType {
	/// Lowercase name used in messages and configuration files.
	pub fn name(&self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Bool => "bool",
		}
	}

	/// Converts a raw string into a value of this type.
	///
	/// Integers accept an optional `0x` prefix for hexadecimal input.
	///
	/// # Errors
	///
	/// Returns the parser message when `raw` is not a valid literal.
	pub fn coerce(&self, raw: &str) -> Result<ParamValue, String> {
		match self {
			Self::String => Ok(ParamValue::String(raw.to_string())),
			Self::Int => parse_integer::<i32>(raw, i32::from_str_radix).map(ParamValue::Int),
			Self::Long => parse_integer::<i64>(raw, i64::from_str_radix).map(ParamValue::Long),
			Self::Float => raw
				.parse::<f64>()
				.map(ParamValue::Float)
				.map_err(|e| e.to_string()),
			Self::Bool => raw
				.parse::<bool>()
				.map(ParamValue::Bool)
				.map_err(|e| e.to_string()),
		}
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

fn parse_integer<T>(
	raw: &str,
	from_str_radix: fn(&str, u32) -> Result<T, std::num::ParseIntError>,
) -> Result<T, String> {
	let (sign, unsigned) = match raw.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", raw.strip_prefix('+').unwrap_or(raw)),
	};
	match unsigned.strip_prefix("0x") {
		Some(hex) if hex.starts_with(['+', '-']) => {
			Err(format!("sign after hex prefix in '{}'", raw))
		}
		Some(hex) => from_str_radix(&format!("{}{}", sign, hex), 16).map_err(|e| e.to_string()),
		None => from_str_radix(raw, 10).map_err(|e| e.to_string()),
	}
}

/// A resolved, typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	/// Explicit absence, only for nullable parameters.
	Null,
	/// Text value.
	String(String),
	/// 32-bit integer value.
	Int(i32),
	/// 64-bit integer value.
	Long(i64),
	/// Float value.
	Float(f64),
	/// Boolean value.
	Bool(bool),
}

impl ParamValue {
	/// Type of the value, `None` for [`ParamValue::Null`].
	pub fn param_type(&self) -> Option<ParamType> {
		match self {
			Self::Null => None,
			Self::String(_) => Some(ParamType::String),
			Self::Int(_) => Some(ParamType::Int),
			Self::Long(_) => Some(ParamType::Long),
			Self::Float(_) => Some(ParamType::Float),
			Self::Bool(_) => Some(ParamType::Bool),
		}
	}

	/// Whether this is [`ParamValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrows the text of a string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Widens the value to `ty` when that loses nothing (`Int` to `Long`,
	/// integers to `Float`). Returns `None` when no such conversion exists.
	pub fn convert_to(self, ty: ParamType) -> Option<Self> {
		match (self, ty) {
			(Self::Null, _) => Some(Self::Null),
			(Self::Int(v), ParamType::Long) => Some(Self::Long(i64::from(v))),
			(Self::Int(v), ParamType::Float) => Some(Self::Float(f64::from(v))),
			(Self::Long(v), ParamType::Int) => i32::try_from(v).ok().map(Self::Int),
			(value, ty) if value.param_type() == Some(ty) => Some(value),
			_ => None,
		}
	}

	fn describe(&self) -> String {
		match self.param_type() {
			Some(ty) => format!("{} {}", ty, self),
			None => "null".to_string(),
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::String(v) => f.write_str(v),
			Self::Int(v) => write!(f, "{}", v),
			Self::Long(v) => write!(f, "{}", v),
			Self::Float(v) => write!(f, "{}", v),
			Self::Bool(v) => write!(f, "{}", v),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Long(value)
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

/// Declaration of one route parameter.
///
/// A parameter is required until it receives a default or is marked
/// nullable.
///
/// ```
/// use waypoint_routes::{ParamSpec, ParamType};
///
/// let name = ParamSpec::new(ParamType::String).default_value("Test").nullable();
/// assert!(!name.is_required());
/// assert!(name.is_nullable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
	ty: ParamType,
	required: bool,
	default: Option<ParamValue>,
	nullable: bool,
}

impl ParamSpec {
	/// Creates a required parameter of the given type.
	pub fn new(ty: ParamType) -> Self {
		Self {
			ty,
			required: true,
			default: None,
			nullable: false,
		}
	}

	/// Gives the parameter a default, making it optional.
	pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
		let value = value.into();
		self.default = Some(value.clone().convert_to(self.ty).unwrap_or(value));
		self.required = false;
		self
	}

	/// Allows `null`, making the parameter optional.
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self.required = false;
		self
	}

	/// Declared type.
	pub fn param_type(&self) -> ParamType {
		self.ty
	}

	/// Whether a value must be supplied.
	pub fn is_required(&self) -> bool {
		self.required
	}

	/// Declared default, if any.
	pub fn default(&self) -> Option<&ParamValue> {
		self.default.as_ref()
	}

	/// Whether `null` is an accepted value.
	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// Checks the declaration for internal consistency.
	pub(crate) fn validate(&self) -> Result<(), String> {
		match &self.default {
			Some(ParamValue::Null) if !self.nullable => {
				Err("a null default requires the parameter to be nullable".to_string())
			}
			Some(value) if !value.is_null() && value.param_type() != Some(self.ty) => Err(format!(
				"default {} does not match declared type {}",
				value.describe(),
				self.ty
			)),
			None if !self.required && !self.nullable => {
				Err("an optional parameter needs a default or must be nullable".to_string())
			}
			_ => Ok(()),
		}
	}

	/// Turns the raw input for this parameter into its resolved value.
	pub(crate) fn resolve(
		&self,
		route: &str,
		name: &str,
		raw: Option<&str>,
	) -> Result<ParamValue, ResolveError> {
		match raw {
			Some("null") if self.nullable => Ok(ParamValue::Null),
			Some(raw) => match self.ty.coerce(raw) {
				Ok(value) => Ok(value),
				Err(reason) if self.required => Err(ResolveError::TypeCoercion {
					route: route.to_string(),
					param: name.to_string(),
					expected: self.ty,
					raw: raw.to_string(),
					reason,
				}),
				Err(reason) => {
					tracing::debug!(route, param = name, raw, %reason, "falling back to default");
					self.absent(route, name)
				}
			},
			None => self.absent(route, name),
		}
	}

	/// Whether a raw value resolves without falling back.
	pub(crate) fn accepts(&self, raw: &str) -> bool {
		(self.nullable && raw == "null") || self.ty.coerce(raw).is_ok()
	}

	fn absent(&self, route: &str, name: &str) -> Result<ParamValue, ResolveError> {
		match (&self.default, self.nullable) {
			(Some(default), _) => Ok(default.clone()),
			(None, true) => Ok(ParamValue::Null),
			(None, false) => Err(ResolveError::MissingRequiredArgument {
				route: route.to_string(),
				param: name.to_string(),
			}),
		}
	}
}

/// Reads a resolved [`ParamValue`] as a Rust type.
///
/// Mirrors a path extractor: each implementation accepts the value kinds it
/// can represent without loss and rejects the rest.
pub trait FromArgument: Sized {
	/// Rust type name used in error messages.
	const TYPE_NAME: &'static str;

	/// Converts the value, or returns `None` if the kind does not fit.
	fn from_argument(value: &ParamValue) -> Option<Self>;
}

// Implements FromArgument for a primitive from a list of accepted variants.
macro_rules! impl_from_argument_for_primitive {
	($($ty:ty => $type_name:expr, [$($variant:ident),+]);* $(;)?) => {
		$(
			impl FromArgument for $ty {
				const TYPE_NAME: &'static str = $type_name;

				fn from_argument(value: &ParamValue) -> Option<Self> {
					match value {
						$(ParamValue::$variant(v) => Some(<$ty>::from(*v)),)+
						_ => None,
					}
				}
			}
		)*
	};
}

impl_from_argument_for_primitive! {
	i32 => "i32", [Int];
	i64 => "i64", [Int, Long];
	f64 => "f64", [Int, Float];
	bool => "bool", [Bool];
}

impl FromArgument for String {
	const TYPE_NAME: &'static str = "String";

	fn from_argument(value: &ParamValue) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl<T: FromArgument> FromArgument for Option<T> {
	const TYPE_NAME: &'static str = T::TYPE_NAME;

	fn from_argument(value: &ParamValue) -> Option<Self> {
		match value {
			ParamValue::Null => Some(None),
			other => T::from_argument(other).map(Some),
		}
	}
}

pub(crate) fn describe_value(value: &ParamValue) -> String {
	value.describe()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ParamType::String, "Alice", ParamValue::String("Alice".to_string()))]
	#[case(ParamType::Int, "12666", ParamValue::Int(12666))]
	#[case(ParamType::Int, "-1", ParamValue::Int(-1))]
	#[case(ParamType::Int, "0x1f", ParamValue::Int(31))]
	#[case(ParamType::Int, "-0x1f", ParamValue::Int(-31))]
	#[case(ParamType::Long, "0x10", ParamValue::Long(16))]
	#[case(ParamType::Long, "9000000000", ParamValue::Long(9_000_000_000))]
	#[case(ParamType::Float, "2.5", ParamValue::Float(2.5))]
	#[case(ParamType::Bool, "true", ParamValue::Bool(true))]
	fn test_coerce_valid(#[case] ty: ParamType, #[case] raw: &str, #[case] expected: ParamValue) {
		assert_eq!(ty.coerce(raw), Ok(expected));
	}

	#[rstest]
	#[case(ParamType::Int, "abc")]
	#[case(ParamType::Int, "9000000000")]
	#[case(ParamType::Int, "")]
	#[case(ParamType::Int, "0x-1")]
	#[case(ParamType::Int, "0x+1")]
	#[case(ParamType::Int, "-0x-1")]
	#[case(ParamType::Float, "1.2.3")]
	#[case(ParamType::Bool, "yes")]
	fn test_coerce_invalid(#[case] ty: ParamType, #[case] raw: &str) {
		assert!(ty.coerce(raw).is_err());
	}

	#[rstest]
	fn test_default_is_widened_to_declared_type() {
		let spec = ParamSpec::new(ParamType::Long).default_value(-1);
		assert_eq!(spec.default(), Some(&ParamValue::Long(-1)));
		assert!(spec.validate().is_ok());
	}

	#[rstest]
	fn test_validate_rejects_mismatched_default() {
		let spec = ParamSpec::new(ParamType::Int).default_value("Test");
		let reason = spec.validate().unwrap_err();
		assert!(reason.contains("does not match declared type int"));
	}

	#[rstest]
	fn test_validate_rejects_null_default_on_non_nullable() {
		let spec = ParamSpec::new(ParamType::String).default_value(ParamValue::Null);
		assert!(spec.validate().is_err());
	}

	#[rstest]
	fn test_resolve_absent_values() {
		// Arrange
		let with_default = ParamSpec::new(ParamType::Int).default_value(-1);
		let nullable = ParamSpec::new(ParamType::String).nullable();
		let required = ParamSpec::new(ParamType::String);

		// Act / Assert
		assert_eq!(with_default.resolve("r", "id", None), Ok(ParamValue::Int(-1)));
		assert_eq!(nullable.resolve("r", "name", None), Ok(ParamValue::Null));
		assert_eq!(
			required.resolve("r", "name", None),
			Err(ResolveError::MissingRequiredArgument {
				route: "r".to_string(),
				param: "name".to_string(),
			})
		);
	}

	#[rstest]
	fn test_resolve_unparsable_value() {
		// Arrange
		let optional = ParamSpec::new(ParamType::Int).default_value(-1);
		let nullable = ParamSpec::new(ParamType::Int).nullable();
		let required = ParamSpec::new(ParamType::Int);

		// Act / Assert
		assert_eq!(optional.resolve("r", "id", Some("abc")), Ok(ParamValue::Int(-1)));
		assert_eq!(nullable.resolve("r", "id", Some("abc")), Ok(ParamValue::Null));
		assert!(matches!(
			required.resolve("r", "id", Some("abc")),
			Err(ResolveError::TypeCoercion { ref raw, .. }) if raw == "abc"
		));
	}

	#[rstest]
	#[case("12", true)]
	#[case("abc", false)]
	#[case("null", true)]
	fn test_accepts(#[case] raw: &str, #[case] expected: bool) {
		let spec = ParamSpec::new(ParamType::Int).nullable();
		assert_eq!(spec.accepts(raw), expected);
	}

	#[rstest]
	fn test_resolve_null_literal_only_for_nullable() {
		let nullable = ParamSpec::new(ParamType::String).nullable();
		let plain = ParamSpec::new(ParamType::String);

		assert_eq!(nullable.resolve("r", "name", Some("null")), Ok(ParamValue::Null));
		assert_eq!(
			plain.resolve("r", "name", Some("null")),
			Ok(ParamValue::String("null".to_string()))
		);
	}

	#[rstest]
	fn test_from_argument_widening() {
		let value = ParamValue::Int(7);
		assert_eq!(i32::from_argument(&value), Some(7));
		assert_eq!(i64::from_argument(&value), Some(7));
		assert_eq!(f64::from_argument(&value), Some(7.0));
		assert_eq!(bool::from_argument(&value), None);
		assert_eq!(String::from_argument(&value), None);
	}

	#[rstest]
	fn test_from_argument_option() {
		assert_eq!(Option::<String>::from_argument(&ParamValue::Null), Some(None));
		assert_eq!(
			Option::<String>::from_argument(&ParamValue::from("Test")),
			Some(Some("Test".to_string()))
		);
		assert_eq!(Option::<i32>::from_argument(&ParamValue::from("x")), None);
	}
}
