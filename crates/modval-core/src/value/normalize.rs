//! Decoding of serialized host values into [`PropertyValue`].
//!
//! The wrapper tokens are a compatibility contract with the host serializer:
//! `SDValueFloat2(float2(0.17365,0.3249))` decodes to `("0.17", "0.32")` at
//! the default precision.

use crate::errors::{ModvalError, Result};
use crate::value::model::{PropertyValue, RawValue, ValueKind};

const WRAPPER_CLOSE: &str = "))";

/// Stateless decoder parameterised by float precision
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    precision: u32,
}

impl Normalizer {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Decode one serialized value
    ///
    /// `collapse_quad` keeps only the first component of a 4-float value,
    /// producing a `Float`. Callers set it for dual-mode nodes fed by
    /// grayscale data.
    ///
    /// Unrecognised forms decode to `Unknown` rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `MalformedValue` when a recognised numeric wrapper holds a
    /// payload that does not parse, has the wrong number of components, or
    /// an enum value carries no selection index.
    pub fn normalize(&self, raw: &RawValue, collapse_quad: bool) -> Result<PropertyValue> {
        let kind = raw.kind();

        if kind == ValueKind::Enum {
            let index = decode_enum_index(&raw.text).ok_or_else(|| malformed(&kind, &raw.text))?;
            return Ok(match raw.enumerator_name(index) {
                Some(name) => PropertyValue::Enum(title_case(name)),
                None => {
                    tracing::debug!(index, "enum index missing from enumerator table");
                    PropertyValue::Enum(index.to_string())
                }
            });
        }

        let payload = match unwrap_payload(&kind, &raw.text) {
            Some(payload) => payload,
            None => return Ok(PropertyValue::Unknown),
        };

        match &kind {
            ValueKind::Array => Ok(PropertyValue::Graph),
            ValueKind::Int => Ok(PropertyValue::Integer(payload.to_string())),
            ValueKind::Int2 => {
                let [a, b] = split_exact::<2>(payload).ok_or_else(|| malformed(&kind, payload))?;
                Ok(PropertyValue::IntPair([a.to_string(), b.to_string()]))
            }
            ValueKind::Bool => Ok(PropertyValue::Boolean(payload.to_string())),
            ValueKind::String => Ok(PropertyValue::Text(payload.to_string())),
            ValueKind::Texture => Ok(PropertyValue::Texture(payload.to_string())),
            ValueKind::Float => Ok(PropertyValue::Float(self.round(&kind, payload)?)),
            ValueKind::Float2 => {
                let [a, b] = self.round_n::<2>(&kind, payload)?;
                Ok(PropertyValue::FloatPair([a, b]))
            }
            ValueKind::Float3 => Ok(PropertyValue::FloatTriple(self.round_n::<3>(&kind, payload)?)),
            ValueKind::Float4 if collapse_quad => {
                let [first, ..] = split_exact::<4>(payload).ok_or_else(|| malformed(&kind, payload))?;
                Ok(PropertyValue::Float(self.round(&kind, first)?))
            }
            ValueKind::Float4 => Ok(PropertyValue::FloatQuad(self.round_n::<4>(&kind, payload)?)),
            ValueKind::ColorRgba => Ok(PropertyValue::ColorRgba(self.round_n::<4>(&kind, payload)?)),
            ValueKind::Enum | ValueKind::Other(_) => Ok(PropertyValue::Unknown),
        }
    }

    fn round(&self, kind: &ValueKind, component: &str) -> Result<String> {
        round_component(component, self.precision).ok_or_else(|| malformed(kind, component))
    }

    fn round_n<const N: usize>(&self, kind: &ValueKind, payload: &str) -> Result<[String; N]> {
        let parts = split_exact::<N>(payload).ok_or_else(|| malformed(kind, payload))?;
        let mut out: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, part) in out.iter_mut().zip(parts) {
            *slot = self.round(kind, part)?;
        }
        Ok(out)
    }
}

fn malformed(kind: &ValueKind, payload: &str) -> ModvalError {
    ModvalError::MalformedValue {
        kind: format!("{:?}", kind),
        payload: payload.to_string(),
    }
}

/// Strip the kind's wrapper tokens, or `None` when the text does not carry them
fn unwrap_payload<'t>(kind: &ValueKind, text: &'t str) -> Option<&'t str> {
    let open = kind.wrapper()?;
    if *kind == ValueKind::Array {
        // Nested structs close with more than one `))`; the prefix is enough.
        return text.starts_with(open).then_some("");
    }
    text.strip_prefix(open)?.strip_suffix(WRAPPER_CLOSE)
}

fn split_exact<const N: usize>(payload: &str) -> Option<[&str; N]> {
    let mut out = [""; N];
    let mut parts = payload.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim();
    }
    parts.next().is_none().then_some(out)
}

/// Round a decimal component and re-stringify it
///
/// The text form always keeps a fractional part (`1` becomes `1.0`), so a
/// value that has already been rounded normalizes to itself.
///
/// Output is always plain decimal, never exponent notation: `1e20` prints
/// as `100000000000000000000.0` and `0.00001` at precision 6 as `0.00001`.
/// Annotations are read side by side, so every magnitude uses one form.
///
/// ```
/// use modval_core::value::round_component;
///
/// assert_eq!(round_component("0.17365", 2).as_deref(), Some("0.17"));
/// assert_eq!(round_component("1", 2).as_deref(), Some("1.0"));
/// assert_eq!(round_component("abc", 2), None);
/// ```
pub fn round_component(text: &str, precision: u32) -> Option<String> {
    let value: f64 = text.trim().parse().ok()?;
    if !value.is_finite() {
        return Some(non_finite_text(value));
    }
    let rounded: f64 = format!("{:.*}", precision as usize, value).parse().ok()?;
    let mut out = rounded.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    Some(out)
}

fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Extract the selection index from a serialized enum value
///
/// Quoted segments (type names, which may contain digits) are dropped and
/// the remaining digits form the index.
///
/// ```
/// use modval_core::value::decode_enum_index;
///
/// assert_eq!(decode_enum_index(r#"SDValueEnum("sbs::blendmode2", 3)"#), Some(3));
/// assert_eq!(decode_enum_index("SDValueEnum()"), None);
/// ```
pub fn decode_enum_index(text: &str) -> Option<i64> {
    let mut in_quote = false;
    let digits: String = text
        .chars()
        .filter(|c| {
            if *c == '"' {
                in_quote = !in_quote;
                return false;
            }
            !in_quote && c.is_ascii_digit()
        })
        .collect();
    digits.parse().ok()
}

/// Title-case a symbolic name: a letter is upper-cased when it follows a
/// non-letter, lower-cased otherwise
///
/// ```
/// use modval_core::value::title_case;
///
/// assert_eq!(title_case("no_tiling"), "No_Tiling");
/// assert_eq!(title_case("SOFT light"), "Soft Light");
/// ```
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::model::Enumerator;

    fn n() -> Normalizer {
        Normalizer::new(2)
    }

    #[test]
    fn test_round_never_uses_exponent() {
        assert_eq!(round_component("1e20", 2).as_deref(), Some("100000000000000000000.0"));
        assert_eq!(round_component("0.00001", 6).as_deref(), Some("0.00001"));
        assert_eq!(round_component("0.00001", 2).as_deref(), Some("0.0"));
    }

    #[test]
    fn test_round_keeps_fraction() {
        assert_eq!(round_component("0", 2).as_deref(), Some("0.0"));
        assert_eq!(round_component("-0.001", 2).as_deref(), Some("-0.0"));
        assert_eq!(round_component("12.4", 0).as_deref(), Some("12.0"));
        assert_eq!(round_component(" 0.255 ", 1).as_deref(), Some("0.3"));
    }

    #[test]
    fn test_int_kept_as_text() {
        let raw = RawValue::new("SDValueInt", "SDValueInt(int(007))");
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Integer("007".into()));
    }

    #[test]
    fn test_int2_split() {
        let raw = RawValue::new("SDValueInt2", "SDValueInt2(int2(8,16))");
        assert_eq!(
            n().normalize(&raw, false).unwrap(),
            PropertyValue::IntPair(["8".into(), "16".into()])
        );
    }

    #[test]
    fn test_float_rounding() {
        let raw = RawValue::new("SDValueFloat", "SDValueFloat(float(0.123456))");
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Float("0.12".into()));
    }

    #[test]
    fn test_collapse_quad() {
        let raw = RawValue::new("SDValueFloat4", "SDValueFloat4(float4(0.5,0.25,0.125,1))");
        assert_eq!(n().normalize(&raw, true).unwrap(), PropertyValue::Float("0.5".into()));
        assert!(matches!(n().normalize(&raw, false).unwrap(), PropertyValue::FloatQuad(_)));
    }

    #[test]
    fn test_color_never_collapses() {
        let raw = RawValue::new("SDValueColorRGBA", "SDValueColorRGBA(ColorRGBA(1,0,0,1))");
        assert_eq!(
            n().normalize(&raw, true).unwrap(),
            PropertyValue::ColorRgba(["1.0".into(), "0.0".into(), "0.0".into(), "1.0".into()])
        );
    }

    #[test]
    fn test_malformed_float_payload() {
        let raw = RawValue::new("SDValueFloat2", "SDValueFloat2(float2(0.5,oops))");
        assert!(matches!(
            n().normalize(&raw, false),
            Err(ModvalError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_wrong_arity_is_malformed() {
        let raw = RawValue::new("SDValueFloat3", "SDValueFloat3(float3(0.5,0.5))");
        assert!(n().normalize(&raw, false).is_err());
    }

    #[test]
    fn test_mismatched_wrapper_is_unknown() {
        let raw = RawValue::new("SDValueFloat", "SDValueFloat2(float2(0.5,0.5))");
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Unknown);
    }

    #[test]
    fn test_unknown_class() {
        let raw = RawValue::new("SDValueMatrix", "SDValueMatrix(...)");
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Unknown);
    }

    #[test]
    fn test_graph_marker() {
        let raw = RawValue::new(
            "SDValueArray",
            "SDValueArray(SDValueStruct(SDValueFloat(float(0.1)),SDValueColorRGBA(ColorRGBA(0,0,0,1))))",
        );
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Graph);
    }

    #[test]
    fn test_enum_resolution_title_case() {
        let raw = RawValue::enumeration(
            r#"SDValueEnum("sbs::compositing::tiling2", 2)"#,
            vec![
                Enumerator::new("no_tiling", 0),
                Enumerator::new("horizontal_tiling", 1),
                Enumerator::new("vertical_tiling", 2),
            ],
        );
        assert_eq!(
            n().normalize(&raw, false).unwrap(),
            PropertyValue::Enum("Vertical_Tiling".into())
        );
    }

    #[test]
    fn test_enum_index_without_enumerator() {
        let raw = RawValue::enumeration("SDValueEnum(9)", vec![Enumerator::new("a", 0)]);
        assert_eq!(n().normalize(&raw, false).unwrap(), PropertyValue::Enum("9".into()));
    }

    #[test]
    fn test_title_case_digits() {
        assert_eq!(title_case("add_sub"), "Add_Sub");
        assert_eq!(title_case("a1b"), "A1B");
    }
}
