use std::borrow::Cow;
use std::fmt;

use aer_wire::Fourcc;

use crate::error::TypeError;
use crate::kind::FieldKind;

/// A field value after its type rule has been applied.
///
/// The variant is determined by the tag's [`FieldKind`], never by the
/// value bytes. `Unknown` holds the raw bytes of fields whose tag has
/// no rule, and of fields whose rule failed on the runtime length.
///
/// Text bytes are kept as-is (one trailing NUL stripped) rather than
/// being forced through UTF-8; the format predates any encoding
/// guarantee. [`Value::as_text`] gives a lossy string view.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Double(f64),
    Text(Vec<u8>),
    Url(Vec<u8>),
    IntList(Vec<i32>),
    DoubleList(Vec<f64>),
    TypeCodeList(Vec<Fourcc>),
    Unknown(Vec<u8>),
}

impl Value {
    /// Apply a decode rule to a field's raw bytes.
    ///
    /// # Errors
    ///
    /// - [`TypeError::ScalarWidth`] if a Bool/Int value is not 4 bytes,
    ///   or a Double value is neither 4 nor 8 bytes.
    /// - [`TypeError::ListLength`] if an array value's byte length is
    ///   not a multiple of the element width.
    pub fn decode(kind: FieldKind, tag: Fourcc, raw: &[u8]) -> Result<Self, TypeError> {
        match kind {
            FieldKind::Bool => Ok(Self::Bool(read_i32(kind, tag, raw)? != 0)),
            FieldKind::Int => Ok(Self::Int(read_i32(kind, tag, raw)?)),
            FieldKind::Double => match raw.len() {
                // Legacy compact encoding: an integer widened on read.
                4 => Ok(Self::Double(f64::from(i32::from_le_bytes(
                    raw.try_into().expect("length checked"),
                )))),
                8 => Ok(Self::Double(f64::from_le_bytes(
                    raw.try_into().expect("length checked"),
                ))),
                len => Err(TypeError::ScalarWidth { tag, kind, len }),
            },
            FieldKind::Text => Ok(Self::Text(strip_nul(raw).to_vec())),
            FieldKind::Url => Ok(Self::Url(strip_nul(raw).to_vec())),
            FieldKind::IntList => {
                let groups = split_groups::<4>(kind, tag, raw)?;
                Ok(Self::IntList(
                    groups.map(|g| i32::from_le_bytes(*g)).collect(),
                ))
            }
            FieldKind::DoubleList => {
                let groups = split_groups::<8>(kind, tag, raw)?;
                Ok(Self::DoubleList(
                    groups.map(|g| f64::from_le_bytes(*g)).collect(),
                ))
            }
            FieldKind::TypeCodeList => {
                let groups = split_groups::<4>(kind, tag, raw)?;
                Ok(Self::TypeCodeList(groups.map(|g| Fourcc::new(*g)).collect()))
            }
        }
    }

    /// Lossy string view of a Text or Url value.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(bytes) | Self::Url(bytes) => Some(String::from_utf8_lossy(bytes)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ints(&self) -> Option<&[i32]> {
        match self {
            Self::IntList(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            Self::DoubleList(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_type_codes(&self) -> Option<&[Fourcc]> {
        match self {
            Self::TypeCodeList(v) => Some(v),
            _ => None,
        }
    }

    /// True for Url values; used for URL side-collection.
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

fn read_i32(kind: FieldKind, tag: Fourcc, raw: &[u8]) -> Result<i32, TypeError> {
    let bytes: [u8; 4] = raw
        .try_into()
        .map_err(|_| TypeError::ScalarWidth {
            tag,
            kind,
            len: raw.len(),
        })?;
    Ok(i32::from_le_bytes(bytes))
}

fn split_groups<const N: usize>(
    kind: FieldKind,
    tag: Fourcc,
    raw: &[u8],
) -> Result<impl Iterator<Item = &[u8; N]>, TypeError> {
    if raw.len() % N != 0 {
        return Err(TypeError::ListLength {
            tag,
            kind,
            len: raw.len(),
            elem: N,
        });
    }
    Ok(raw.chunks_exact(N).map(|g| g.try_into().expect("exact chunks")))
}

/// Drop one trailing NUL byte, if present.
fn strip_nul(raw: &[u8]) -> &[u8] {
    match raw.split_last() {
        Some((0, rest)) => rest,
        _ => raw,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Text(bytes) | Self::Url(bytes) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(bytes))
            }
            Self::IntList(v) => write_list(f, v.iter()),
            Self::DoubleList(v) => write_list(f, v.iter()),
            Self::TypeCodeList(v) => write_list(f, v.iter()),
            Self::Unknown(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}
