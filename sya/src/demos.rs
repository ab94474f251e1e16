#![forbid(unsafe_code)]

//! Small kernels bundled with the CLI.

use crate::{assert_that, ConcreteType, Kernel, Params, TraceError, Value, BINARY, U16, U32, U8};

/// Product of two little-endian `u32` fields at offsets 0 and 4.
pub struct ProductLe;

impl Kernel for ProductLe {
    fn name(&self) -> &'static str {
        "product_le"
    }

    fn params(&self) -> Vec<ConcreteType> {
        vec![BINARY]
    }

    fn returns(&self) -> ConcreteType {
        U32
    }

    fn trace(&self, p: Params<'_>) -> Result<Value, TraceError> {
        let x = p.bytes(0)?;
        let a = x.slice(0, 4)?.u32_le(0)?;
        let b = x.slice(4, 8)?.u32_le(0)?;
        Ok((a * b).into())
    }
}

/// `(x + 2) * 10 - y * 2`
pub struct Affine;

impl Kernel for Affine {
    fn name(&self) -> &'static str {
        "affine"
    }

    fn params(&self) -> Vec<ConcreteType> {
        vec![U32, U32]
    }

    fn returns(&self) -> ConcreteType {
        U32
    }

    fn trace(&self, p: Params<'_>) -> Result<Value, TraceError> {
        let (x, y) = (p.int(0)?, p.int(1)?);
        Ok(((x + 2) * 10 - y * 2).into())
    }
}

/// Doubles a byte that must lie in `[10, 200)`.
pub struct ClampedDouble;

impl Kernel for ClampedDouble {
    fn name(&self) -> &'static str {
        "clamped_double"
    }

    fn params(&self) -> Vec<ConcreteType> {
        vec![U8]
    }

    fn returns(&self) -> ConcreteType {
        U16
    }

    fn trace(&self, p: Params<'_>) -> Result<Value, TraceError> {
        let x = p.int(0)?;
        assert_that(x.ge(10) & x.lt(200))?;
        Ok((x * 2).into())
    }
}

/// Big-endian `u16` at offset 2 of a header.
pub struct HeaderWord;

impl Kernel for HeaderWord {
    fn name(&self) -> &'static str {
        "header_word"
    }

    fn params(&self) -> Vec<ConcreteType> {
        vec![BINARY]
    }

    fn returns(&self) -> ConcreteType {
        U16
    }

    fn trace(&self, p: Params<'_>) -> Result<Value, TraceError> {
        Ok(p.bytes(0)?.u16_be(2)?.into())
    }
}

pub static DEMOS: &[&(dyn Kernel + Sync)] = &[&ProductLe, &Affine, &ClampedDouble, &HeaderWord];

pub fn find(name: &str) -> Option<&'static (dyn Kernel + Sync)> {
    DEMOS.iter().copied().find(|k| k.name() == name)
}
