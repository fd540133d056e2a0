//! Canonical CBOR encoding for deterministic serialization.
//!
//! Any serde value is first lowered to a [`ciborium::value::Value`] and then
//! written out following RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats, no tags
//!
//! An operation is the array `[ordinal, payload]`, so equal operations encode
//! to equal bytes and a transaction id is stable across platforms.

use ciborium::value::{Integer, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::ops::{Operation, OperationKind};
use crate::transaction::Transaction;

/// Encode any serializable value to canonical CBOR bytes.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    let value =
        Value::serialized(value).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value)?;
    Ok(buf)
}

pub fn encode_operation(op: &Operation) -> Result<Vec<u8>, CoreError> {
    canonical_bytes(op)
}

/// Decode one operation. An ordinal outside the catalog is reported as
/// [`CoreError::UnknownOperation`].
pub fn decode_operation(bytes: &[u8]) -> Result<Operation, CoreError> {
    let value = read_value(bytes)?;
    check_operation_tag(&value)?;
    decode_value(&value, bytes)
}

pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, CoreError> {
    canonical_bytes(tx)
}

pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction, CoreError> {
    let value = read_value(bytes)?;
    if let Some(Value::Array(ops)) = map_entry(&value, "operations") {
        for op in ops {
            check_operation_tag(op)?;
        }
    }
    decode_value(&value, bytes)
}

fn read_value(bytes: &[u8]) -> Result<Value, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

/// Deserialize and insist that the input was already canonical.
fn decode_value<T: Serialize + DeserializeOwned>(
    value: &Value,
    bytes: &[u8],
) -> Result<T, CoreError> {
    let decoded: T = value
        .deserialized()
        .map_err(|e| CoreError::DecodingError(e.to_string()))?;
    if canonical_bytes(&decoded)? != bytes {
        return Err(CoreError::DecodingError("non-canonical encoding".into()));
    }
    Ok(decoded)
}

fn check_operation_tag(value: &Value) -> Result<(), CoreError> {
    let tag = match value {
        Value::Array(items) => match items.first() {
            Some(Value::Integer(tag)) => *tag,
            _ => return Err(CoreError::DecodingError("missing operation tag".into())),
        },
        _ => return Err(CoreError::DecodingError("expected operation array".into())),
    };
    let tag = u16::try_from(tag)
        .map_err(|_| CoreError::DecodingError(format!("operation tag out of range: {}", i128::from(tag))))?;
    match OperationKind::from_u16(tag) {
        Some(_) => Ok(()),
        None => Err(CoreError::UnknownOperation(tag)),
    }
}

fn map_entry<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Map(entries) => entries
            .iter()
            .find(|(k, _)| matches!(k, Value::Text(text) if text == key))
            .map(|(_, v)| v),
        _ => None,
    }
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr)?,
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        Value::Float(_) => {
            return Err(CoreError::EncodingError(
                "floats not supported in canonical encoding".into(),
            ))
        }
        _ => {
            return Err(CoreError::EncodingError(
                "unsupported CBOR value type".into(),
            ))
        }
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n = i128::from(i);
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // -1 is written as 0, -2 as 1, and so on.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<(), CoreError> {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Encode a map with keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, key)?;
        pairs.push((key_buf, value));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(CoreError::EncodingError("duplicate map key".into()));
    }

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}
