#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::{IntervalSet, IrError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntegerType {
    bits: u32,
    signed: bool,
}

impl IntegerType {
    pub fn new(bits: u32, signed: bool) -> Result<Self, IrError> {
        match bits {
            8 | 16 | 32 | 64 => Ok(Self { bits, signed }),
            _ => Err(IrError::UnsupportedWidth { bits }),
        }
    }

    const fn of(bits: u32, signed: bool) -> Self {
        Self { bits, signed }
    }

    pub fn bits(self) -> u32 {
        self.bits
    }

    pub fn is_signed(self) -> bool {
        self.signed
    }

    /// Every value this type can hold, as `[min, max + 1)`.
    ///
    /// Bounds follow the declared width, so `u8` is `[0, 256)` and `s64` is
    /// `[-2^63, 2^63)`.
    pub fn representable_range(self) -> IntervalSet {
        if self.signed {
            let half = 1i128 << (self.bits - 1);
            IntervalSet::range(-half, half)
        } else {
            IntervalSet::range(0, 1i128 << self.bits)
        }
    }

    /// Fixed-width C spelling, e.g. `uint8_t`.
    pub fn c_name(self) -> String {
        if self.signed {
            format!("int{}_t", self.bits)
        } else {
            format!("uint{}_t", self.bits)
        }
    }
}

/// An integer constant as C source.
///
/// Values above `INT64_MAX` only fit `unsigned long long` and get a `ULL`
/// suffix. `INT64_MIN` has no literal form, so it is spelled as an expression.
pub fn c_literal(v: i128) -> String {
    if v > i64::MAX as i128 {
        format!("{v}ULL")
    } else if v == i64::MIN as i128 {
        "(-9223372036854775807 - 1)".to_string()
    } else {
        v.to_string()
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.signed { 's' } else { 'u' }, self.bits)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    Integer(IntegerType),
    /// A byte pointer whose length travels as a separate parameter of `length` type.
    ByteArray { length: IntegerType },
    Void,
}

pub const U8: ConcreteType = ConcreteType::Integer(IntegerType::of(8, false));
pub const S8: ConcreteType = ConcreteType::Integer(IntegerType::of(8, true));
pub const U16: ConcreteType = ConcreteType::Integer(IntegerType::of(16, false));
pub const S16: ConcreteType = ConcreteType::Integer(IntegerType::of(16, true));
pub const U32: ConcreteType = ConcreteType::Integer(IntegerType::of(32, false));
pub const S32: ConcreteType = ConcreteType::Integer(IntegerType::of(32, true));
pub const U64: ConcreteType = ConcreteType::Integer(IntegerType::of(64, false));
pub const S64: ConcreteType = ConcreteType::Integer(IntegerType::of(64, true));
pub const BINARY: ConcreteType = ConcreteType::ByteArray {
    length: IntegerType::of(32, false),
};
pub const VOID: ConcreteType = ConcreteType::Void;

/// The named catalog, in the order names are reported to users.
pub static CATALOG: [(&str, ConcreteType); 10] = [
    ("u8", U8),
    ("s8", S8),
    ("u16", U16),
    ("s16", S16),
    ("u32", U32),
    ("s32", S32),
    ("u64", U64),
    ("s64", S64),
    ("binary", BINARY),
    ("void", VOID),
];

impl ConcreteType {
    pub fn byte_array(length: IntegerType) -> Result<Self, IrError> {
        if length.is_signed() {
            return Err(IrError::SignedLengthType);
        }
        Ok(ConcreteType::ByteArray { length })
    }

    pub fn as_integer(&self) -> Option<IntegerType> {
        match self {
            ConcreteType::Integer(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ConcreteType::Void)
    }

    pub fn representable_range(&self) -> Option<IntervalSet> {
        self.as_integer().map(IntegerType::representable_range)
    }

    /// The type as it appears before a declarator: `uint32_t`, `uint8_t *`, `void`.
    pub fn c_name(&self) -> String {
        match self {
            ConcreteType::Integer(t) => t.c_name(),
            ConcreteType::ByteArray { .. } => "uint8_t *".to_string(),
            ConcreteType::Void => "void".to_string(),
        }
    }

    /// A full declarator such as `uint32_t arg_0` or `uint8_t *arg_0`.
    pub fn declare(&self, name: &str) -> String {
        match self {
            ConcreteType::ByteArray { .. } => format!("uint8_t *{name}"),
            _ => format!("{} {name}", self.c_name()),
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Integer(t) => write!(f, "{t}"),
            ConcreteType::ByteArray { length } if *length == IntegerType::of(32, false) => {
                f.write_str("binary")
            }
            ConcreteType::ByteArray { length } => write!(f, "binary<{length}>"),
            ConcreteType::Void => f.write_str("void"),
        }
    }
}

impl FromStr for ConcreteType {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, ty)| *ty)
            .ok_or_else(|| IrError::UnknownType {
                name: s.to_string(),
            })
    }
}
