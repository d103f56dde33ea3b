//! Lattice input: an object-safe [`Input`] trait so [`StringInput`] and a
//! user's own [`CustomInput`] payload can sit side by side behind
//! `Box<dyn Input>` inside a [`crate::lattice::Lattice`], rather than
//! threading a generic parameter through every lattice structure.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::{collections::hash_map::DefaultHasher, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    OutOfRange {
        start: usize,
        length: usize,
        total: usize,
    },
    /// `append` was called with an input of a different concrete type.
    Mismatch,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                start,
                length,
                total,
            } => write!(
                f,
                "subrange [{start}, {start}+{length}) out of bounds for input of length {total}"
            ),
            Self::Mismatch => f.write_str("cannot append inputs of different concrete types"),
        }
    }
}

impl error::Error for InputError {}

/// A span of lattice input. Object-safe so heterogeneous inputs can be
/// stored behind a single `Box<dyn Input>`.
pub trait Input: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn equals(&self, other: &dyn Input) -> bool;
    fn hash_value(&self) -> u64;
    fn length(&self) -> usize;
    fn clone_box(&self) -> Box<dyn Input>;
    fn create_subrange(&self, start: usize, length: usize) -> Result<Box<dyn Input>, InputError>;
    fn append(&mut self, other: Box<dyn Input>) -> Result<(), InputError>;
}

impl Clone for Box<dyn Input> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Input {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// A plain byte-string input. Comparison, hashing, and slicing all operate
/// on raw bytes, not Unicode grapheme clusters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringInput {
    bytes: Vec<u8>,
}

impl StringInput {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            bytes: s.into().into_bytes(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Input for StringInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals(&self, other: &dyn Input) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.bytes == self.bytes)
    }

    fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.bytes.hash(&mut hasher);
        hasher.finish()
    }

    fn length(&self) -> usize {
        self.bytes.len()
    }

    fn clone_box(&self) -> Box<dyn Input> {
        Box::new(self.clone())
    }

    fn create_subrange(&self, start: usize, length: usize) -> Result<Box<dyn Input>, InputError> {
        let end = start
            .checked_add(length)
            .filter(|&e| e <= self.bytes.len())
            .ok_or(InputError::OutOfRange {
                start,
                length,
                total: self.bytes.len(),
            })?;
        Ok(Box::new(Self {
            bytes: self.bytes[start..end].to_vec(),
        }))
    }

    fn append(&mut self, other: Box<dyn Input>) -> Result<(), InputError> {
        let other = other
            .as_any()
            .downcast_ref::<Self>()
            .ok_or(InputError::Mismatch)?;
        self.bytes.extend_from_slice(&other.bytes);
        Ok(())
    }
}

/// User-supplied operations for a [`CustomInput<C>`] payload `C`, kept as a
/// small bundle of function objects rather than a second trait a caller
/// would have to implement on `C` itself.
pub struct CustomInputCallbacks<C> {
    pub equals: Rc<dyn Fn(&C, &C) -> bool>,
    pub hash_value: Rc<dyn Fn(&C) -> u64>,
    pub length: Rc<dyn Fn(&C) -> usize>,
    pub create_subrange: Rc<dyn Fn(&C, usize, usize) -> Result<C, InputError>>,
    pub append: Rc<dyn Fn(&mut C, &C) -> Result<(), InputError>>,
}

impl<C> Clone for CustomInputCallbacks<C> {
    fn clone(&self) -> Self {
        Self {
            equals: Rc::clone(&self.equals),
            hash_value: Rc::clone(&self.hash_value),
            length: Rc::clone(&self.length),
            create_subrange: Rc::clone(&self.create_subrange),
            append: Rc::clone(&self.append),
        }
    }
}

/// A lattice input wrapping a user-defined payload `C`, dispatched through
/// caller-supplied [`CustomInputCallbacks`] rather than requiring `C` to
/// implement `Input` itself.
#[derive(Clone)]
pub struct CustomInput<C> {
    value: C,
    callbacks: CustomInputCallbacks<C>,
}

impl<C> CustomInput<C> {
    pub fn new(value: C, callbacks: CustomInputCallbacks<C>) -> Self {
        Self { value, callbacks }
    }

    #[must_use]
    pub fn value(&self) -> &C {
        &self.value
    }
}

impl<C> fmt::Debug for CustomInput<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomInput")
            .field("length", &(self.callbacks.length)(&self.value))
            .finish()
    }
}

impl<C: Clone + 'static> Input for CustomInput<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals(&self, other: &dyn Input) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| (self.callbacks.equals)(&self.value, &o.value))
    }

    fn hash_value(&self) -> u64 {
        (self.callbacks.hash_value)(&self.value)
    }

    fn length(&self) -> usize {
        (self.callbacks.length)(&self.value)
    }

    fn clone_box(&self) -> Box<dyn Input> {
        Box::new(self.clone())
    }

    fn create_subrange(&self, start: usize, length: usize) -> Result<Box<dyn Input>, InputError> {
        let value = (self.callbacks.create_subrange)(&self.value, start, length)?;
        Ok(Box::new(Self {
            value,
            callbacks: self.callbacks.clone(),
        }))
    }

    fn append(&mut self, other: Box<dyn Input>) -> Result<(), InputError> {
        let other = other
            .as_any()
            .downcast_ref::<Self>()
            .ok_or(InputError::Mismatch)?;
        (self.callbacks.append)(&mut self.value, &other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_input_equality_and_subrange() {
        let a: Box<dyn Input> = Box::new(StringInput::new("hello"));
        let b: Box<dyn Input> = Box::new(StringInput::new("hello"));
        assert!(a.equals(b.as_ref()));
        assert_eq!(5, a.length());
        let sub = a.create_subrange(1, 3).unwrap();
        assert_eq!(b"ell", sub.as_any().downcast_ref::<StringInput>().unwrap().as_bytes());
    }

    #[test]
    fn string_input_subrange_out_of_bounds() {
        let a = StringInput::new("hi");
        assert!(a.create_subrange(1, 5).is_err());
    }

    #[test]
    fn string_input_append() {
        let mut a = StringInput::new("foo");
        a.append(Box::new(StringInput::new("bar"))).unwrap();
        assert_eq!("foobar", a.to_string_lossy());
    }

    #[test]
    fn custom_input_dispatches_through_callbacks() {
        let callbacks = CustomInputCallbacks {
            equals: Rc::new(|a: &i32, b: &i32| a == b),
            hash_value: Rc::new(|v: &i32| *v as u64),
            length: Rc::new(|_: &i32| 1),
            create_subrange: Rc::new(|v: &i32, _start, _len| Ok(*v)),
            append: Rc::new(|a: &mut i32, b: &i32| {
                *a += *b;
                Ok(())
            }),
        };
        let a: Box<dyn Input> = Box::new(CustomInput::new(5, callbacks.clone()));
        let b: Box<dyn Input> = Box::new(CustomInput::new(5, callbacks));
        assert!(a.equals(b.as_ref()));
        assert_eq!(1, a.length());
    }
}
