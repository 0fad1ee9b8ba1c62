//! Deserializing request fields gathered from several places.
//!
//! Path segments, query pairs, headers and form fields arrive as text and are
//! parsed into the target field type on demand. JSON body fields keep their
//! JSON type. Both kinds sit in one [`Fields`] map so a struct can be filled
//! from all sources in a single pass.

use serde::de::{
    self, value::MapDeserializer, value::StringDeserializer, DeserializeOwned, Deserializer,
    IntoDeserializer, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw text, parsed when the target type asks for a number or bool
    Text(String),
    Json(Value),
}

/// Field name to value; inserting an existing name replaces it
pub type Fields = BTreeMap<String, FieldValue>;

/// Deserialize `T` from the collected fields. Unknown names are ignored
/// unless `T` denies them.
pub fn from_fields<T: DeserializeOwned>(fields: Fields) -> Result<T, serde_json::Error> {
    let deserializer: MapDeserializer<_, serde_json::Error> = MapDeserializer::new(fields.into_iter());
    T::deserialize(deserializer)
}

/// Text fields from `(name, value)` pairs; a later pair overwrites an earlier one
pub fn text_fields<I, K, V>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), FieldValue::Text(v.into())))
        .collect()
}

macro_rules! parse_text {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                match self {
                    FieldValue::Text(text) => match text.parse() {
                        Ok(parsed) => visitor.$visit(parsed),
                        Err(_) => Err(de::Error::invalid_value(de::Unexpected::Str(&text), &visitor)),
                    },
                    FieldValue::Json(value) => value.$method(visitor),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for FieldValue {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            FieldValue::Text(text) => visitor.visit_string(text),
            FieldValue::Json(value) => value.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self {
            FieldValue::Text(text) => visitor.visit_some(FieldValue::Text(text)),
            FieldValue::Json(value) => value.deserialize_option(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self {
            FieldValue::Text(text) => visitor.visit_newtype_struct(FieldValue::Text(text)),
            FieldValue::Json(value) => value.deserialize_newtype_struct(name, visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self {
            FieldValue::Text(text) => {
                let variant: StringDeserializer<serde_json::Error> = text.into_deserializer();
                variant.deserialize_enum(name, variants, visitor)
            }
            FieldValue::Json(value) => value.deserialize_enum(name, variants, visitor),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }

    parse_text! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
        deserialize_char => visit_char,
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

impl<'de> IntoDeserializer<'de, serde_json::Error> for FieldValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}
