//! Plain object detection
//!
//! A plain object is a literal record of key/value pairs: a `HashMap`, a
//! `BTreeMap`, a JSON object, or a struct that serializes itself as a map.
//! Named structs and enum variants are tagged instances of a declared type
//! and are not plain; neither are sequences, scalars or null.
//!
//! The check runs the value through a serializer that stops at the first
//! call and reports which shape of the serde data model it saw.

use serde::ser::{self, Impossible, Serialize, Serializer};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Null,
    Scalar,
    Sequence,
    Map,
    Tagged,
}

/// Carries the detected shape out of compound serializer calls
#[derive(Error, Debug)]
enum Probe {
    #[error("value serializes as {0:?}")]
    Resolved(Shape),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for Probe {
    fn custom<T: Display>(msg: T) -> Self {
        Probe::Custom(msg.to_string())
    }
}

struct ShapeSerializer;

impl Serializer for ShapeSerializer {
    type Ok = Shape;
    type Error = Probe;
    type SerializeSeq = Impossible<Shape, Probe>;
    type SerializeTuple = Impossible<Shape, Probe>;
    type SerializeTupleStruct = Impossible<Shape, Probe>;
    type SerializeTupleVariant = Impossible<Shape, Probe>;
    type SerializeMap = Impossible<Shape, Probe>;
    type SerializeStruct = Impossible<Shape, Probe>;
    type SerializeStructVariant = Impossible<Shape, Probe>;

    fn serialize_bool(self, _v: bool) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_i8(self, _v: i8) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_i16(self, _v: i16) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_i32(self, _v: i32) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_i64(self, _v: i64) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_i128(self, _v: i128) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_u8(self, _v: u8) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_u16(self, _v: u16) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_u32(self, _v: u32) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_u64(self, _v: u64) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_u128(self, _v: u128) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_f32(self, _v: f32) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_f64(self, _v: f64) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_char(self, _v: char) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_str(self, _v: &str) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, Probe> {
        Ok(Shape::Scalar)
    }

    fn serialize_none(self) -> Result<Shape, Probe> {
        Ok(Shape::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Shape, Probe>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, Probe> {
        Ok(Shape::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, Probe> {
        Ok(Shape::Tagged)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Shape, Probe> {
        Ok(Shape::Tagged)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, _value: &T) -> Result<Shape, Probe>
    where
        T: ?Sized + Serialize,
    {
        Ok(Shape::Tagged)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Shape, Probe>
    where
        T: ?Sized + Serialize,
    {
        Ok(Shape::Tagged)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Probe> {
        Err(Probe::Resolved(Shape::Sequence))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Probe> {
        Err(Probe::Resolved(Shape::Sequence))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Probe> {
        Err(Probe::Resolved(Shape::Tagged))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Probe> {
        Err(Probe::Resolved(Shape::Tagged))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Probe> {
        Err(Probe::Resolved(Shape::Map))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Probe> {
        Err(Probe::Resolved(Shape::Tagged))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Probe> {
        Err(Probe::Resolved(Shape::Tagged))
    }
}

fn shape_of<T: Serialize + ?Sized>(value: &T) -> Shape {
    match value.serialize(ShapeSerializer) {
        Ok(shape) | Err(Probe::Resolved(shape)) => shape,
        // The value refused to serialize; it is certainly not a literal record
        Err(Probe::Custom(_)) => Shape::Tagged,
    }
}

/// Returns true if the argument appears to be a plain object.
///
/// An empty map counts as plain.
pub fn is_plain_object<T: Serialize + ?Sized>(value: &T) -> bool {
    shape_of(value) == Shape::Map
}
