//! [`Bind`] impls for scalar leaf types.

use std::path::PathBuf;

use confit_value::{Date, Datetime, Node, Scalar, ScalarKind, Time};

use crate::bind::context::BindContext;
use crate::bind::error::{BindErrorKind, Recorded};
use crate::bind::Bind;
use crate::schema::Shape;

impl Bind for String {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::String(text)) => Ok(text.clone()),
            other => Err(cx.mismatch("string", other)),
        }
    }
}

impl Bind for bool {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Boolean)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Boolean(value)) => Ok(*value),
            other => Err(cx.mismatch("boolean", other)),
        }
    }
}

impl Bind for i64 {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Integer)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Integer(value)) => Ok(*value),
            other => Err(cx.mismatch("integer", other)),
        }
    }
}

impl Bind for f64 {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Float)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Float(value)) => Ok(*value),
            // Integers widen losslessly enough for configuration use.
            Node::Scalar(Scalar::Integer(value)) => Ok(*value as f64),
            other => Err(cx.mismatch("float", other)),
        }
    }
}

macro_rules! impl_bind_for_int {
    ($ty:ty, $human:literal) => {
        impl Bind for $ty {
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::Integer)
            }

            fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
                let value = i64::coerce(node, cx)?;
                <$ty>::try_from(value).map_err(|_| {
                    cx.fail(BindErrorKind::InvalidValue {
                        reason: format!("{value} is out of range for {}", $human),
                    })
                })
            }
        }
    };
}

impl_bind_for_int!(i32, "a 32-bit signed integer");
impl_bind_for_int!(u16, "a 16-bit unsigned integer");
impl_bind_for_int!(u32, "a 32-bit unsigned integer");
impl_bind_for_int!(u64, "a 64-bit unsigned integer");
impl_bind_for_int!(usize, "a pointer-sized unsigned integer");

impl Bind for Date {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Date)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Date(date)) => Ok(*date),
            other => Err(cx.mismatch("date", other)),
        }
    }
}

impl Bind for Time {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Time)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Time(time)) => Ok(*time),
            other => Err(cx.mismatch("time", other)),
        }
    }
}

impl Bind for Datetime {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Datetime)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::Datetime(datetime)) => Ok(datetime.clone()),
            other => Err(cx.mismatch("datetime", other)),
        }
    }
}

impl Bind for PathBuf {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::String)
    }

    fn coerce(node: &Node, cx: &BindContext<'_>) -> Result<Self, Recorded> {
        match node {
            Node::Scalar(Scalar::String(text)) => Ok(PathBuf::from(text)),
            other => Err(cx.mismatch("string", other)),
        }
    }
}
