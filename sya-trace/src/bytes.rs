#![forbid(unsafe_code)]

use std::rc::Rc;

use crate::expr::{Expr, Render};
use crate::frame::assert_that;
use crate::value::{Cond, Int};
use crate::TraceError;

/// A symbolic byte sequence: a byte-array argument or a window onto one.
///
/// Windows are always expressed against the underlying argument, so slicing
/// a slice stays one level deep and every read becomes `base[offset]`.
#[derive(Clone, Debug)]
pub struct Bytes {
    base: Rc<Expr>,
    base_len: Int,
    start: Int,
    length: Int,
    view: Rc<Expr>,
}

fn offset(v: &Int, by: &Int) -> Int {
    match by.as_lit() {
        Some(0) => v.clone(),
        _ => v + by,
    }
}

/// `0 <= start <= stop <= length`.
fn check_window(start: &Int, stop: &Int, length: &Int) -> Result<(), TraceError> {
    assert_that(start.ge(0))?;
    assert_that(stop.ge(start))?;
    assert_that(stop.le(length))
}

impl Bytes {
    pub(crate) fn argument(base: Rc<Expr>, length: Int) -> Self {
        Self {
            view: base.clone(),
            base,
            base_len: length.clone(),
            start: Int::Lit(0),
            length,
        }
    }

    fn is_window(&self) -> bool {
        !Rc::ptr_eq(&self.view, &self.base)
    }

    /// Number of bytes in this view.
    pub fn len(&self) -> Int {
        self.length.clone()
    }

    pub fn expr(&self) -> &Rc<Expr> {
        &self.view
    }

    /// The byte at `key`, after asserting `0 <= key < len`.
    pub fn at(&self, key: impl Into<Int>) -> Result<Int, TraceError> {
        let key = key.into();
        assert_that(key.ge(0))?;
        assert_that(key.lt(&self.length))?;

        let key = if self.is_window() {
            let key = offset(&key, &self.start);
            assert_that(key.ge(0))?;
            assert_that(key.lt(&self.base_len))?;
            key
        } else {
            key
        };
        Ok(Int::Sym(Rc::new(Expr::ByteIndex {
            source: self.base.clone(),
            key,
        })))
    }

    /// `self[start:stop]`.
    pub fn slice(&self, start: impl Into<Int>, stop: impl Into<Int>) -> Result<Bytes, TraceError> {
        self.slice_step(start, stop, 1)
    }

    /// `self[start:stop:step]`. Only a step of 1 is supported.
    pub fn slice_step(
        &self,
        start: impl Into<Int>,
        stop: impl Into<Int>,
        step: i128,
    ) -> Result<Bytes, TraceError> {
        if step != 1 {
            return Err(TraceError::UnsupportedSliceStep { step });
        }
        let (start, stop) = (start.into(), stop.into());
        check_window(&start, &stop, &self.length)?;

        let (start, stop) = if self.is_window() {
            let (start, stop) = (offset(&start, &self.start), offset(&stop, &self.start));
            check_window(&start, &stop, &self.base_len)?;
            (start, stop)
        } else {
            (start, stop)
        };

        let length = &stop - &start;
        Ok(Bytes {
            view: Rc::new(Expr::ByteSlice {
                base: self.base.clone(),
                start: start.clone(),
                length: length.clone(),
            }),
            base: self.base.clone(),
            base_len: self.base_len.clone(),
            start,
            length,
        })
    }

    /// Byte-wise equality against a literal: the lengths must match and the
    /// result is the conjunction of `self[i] == literal[i]`.
    pub fn eq_bytes(&self, literal: &[u8]) -> Result<Cond, TraceError> {
        assert_that(self.length.eq(literal.len()))?;
        let mut all = Cond::Known(true);
        for (i, b) in literal.iter().enumerate() {
            all = all & self.at(i)?.eq(*b);
        }
        Ok(all)
    }

    /// Equality between two symbolic byte sequences. Not supported.
    pub fn eq_view(&self, _other: &Bytes) -> Result<Cond, TraceError> {
        Err(TraceError::SymbolicByteComparison)
    }

    pub fn u8(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        self.at(at)
    }

    pub fn u16_le(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.at(&at)? | (self.at(&at + 1)? << 8))
    }

    pub fn u16_be(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.at(&at + 1)? | (self.at(&at)? << 8))
    }

    pub fn u32_le(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.u16_le(&at)? | (self.u16_le(&at + 2)? << 16))
    }

    pub fn u32_be(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.u16_be(&at + 2)? | (self.u16_be(&at)? << 16))
    }

    pub fn u64_le(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.u32_le(&at)? | (self.u32_le(&at + 4)? << 32))
    }

    pub fn u64_be(&self, at: impl Into<Int>) -> Result<Int, TraceError> {
        let at = at.into();
        Ok(self.u32_be(&at + 4)? | (self.u32_be(&at)? << 32))
    }
}

impl Render for Bytes {
    fn render(&self) -> String {
        self.view.render()
    }
}
