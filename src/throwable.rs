//! Errors as values.
//!
//! A [`Throwable`] is a message, a stack of frames, an optional cause and any number of
//! suppressed throwables. When it carries a data map it is written as `EX_INFO`.

use crate::{vecmap::VecMap, Value};
use std::error::Error;

/// One stack frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub class: String,
    pub method: String,
    pub file: Option<String>,
    pub line: i32,
}

impl Frame {
    pub fn new<C: Into<String>, M: Into<String>>(class: C, method: M) -> Self {
        Frame {
            class: class.into(),
            method: method.into(),
            file: None,
            line: -1,
        }
    }

    /// Sets the source location.
    pub fn at<F: Into<String>>(mut self, file: F, line: i32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self
    }
}

/// An error value with its cause chain.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Throwable {
    pub message: Option<String>,
    pub frames: Vec<Frame>,
    pub cause: Option<Box<Throwable>>,
    pub suppressed: Vec<Throwable>,
    pub data: Option<VecMap<Value, Value>>,
}

impl Throwable {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Throwable {
            message: Some(message.into()),
            ..Throwable::default()
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_cause(mut self, cause: Throwable) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_suppressed(mut self, t: Throwable) -> Self {
        self.suppressed.push(t);
        self
    }

    pub fn with_data(mut self, data: VecMap<Value, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Captures `e` and its `source()` chain.
    pub fn from_error(e: &(dyn Error + 'static)) -> Self {
        let mut t = Throwable::new(e.to_string());
        if let Some(src) = e.source() {
            t.cause = Some(Box::new(Throwable::from_error(src)));
        }
        t
    }

    /// How many causes deep the chain goes.
    pub fn depth(&self) -> usize { self.cause.as_ref().map_or(0, |c| 1 + c.depth()) }
}
