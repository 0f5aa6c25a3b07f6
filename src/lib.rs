#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Codec
//!
//! Typed, bidirectional conversion between native Rust values and DynamoDB
//! attribute values, plus a composable algebra for update expressions.
//!
//! ## Overview
//!
//! - [`codec`] turns native values into [`wire::WireValue`]s and back. Codecs are
//!   plain values composed from primitives, collections and combinators, and
//!   derived for records and tagged unions with [`record_codec!`] and [`union_codec!`].
//! - [`write::update_expression`] builds update expressions from independent
//!   fragments that merge without placeholder collisions.
//! - [`common`] holds attribute paths, condition and projection expressions.
//! - [`read`] and [`write`] convert whole items at the SDK boundary.
//!
//! ## Quick Example
//!
//! ```rust
//! use aws_sdk_dynamodb::types::AttributeValue;
//! use dynamodb_codec::{codec, read, record_codec, write};
//! use std::collections::HashSet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     items: HashSet<i32>,
//! }
//!
//! record_codec! {
//!     PersonCodec for Person {
//!         name: codec::string(),
//!         items as "item": codec::set::<i32>(),
//!     }
//! }
//!
//! let person = Person {
//!     name: "bob".to_string(),
//!     items: HashSet::from([1, 2, 3]),
//! };
//! let item = write::encode_item(&PersonCodec, &person).unwrap();
//! assert_eq!(item["name"], AttributeValue::S("bob".to_string()));
//! assert_eq!(read::decode_item(&PersonCodec, item).unwrap(), person);
//!
//! let update = write::update_expression::UpdateExpression::append(
//!     "history",
//!     &codec::string(),
//!     &"login".to_string(),
//! );
//! assert_eq!(
//!     update.expression(),
//!     "SET #updateAppend_0 = list_append(if_not_exists(#updateAppend_0, :emptyList), :updateAppend)"
//! );
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit spans for item conversion and expression rendering.

/// Native value conversion.
pub mod codec;

/// Attribute paths, conditions and projections.
pub mod common;

/// Errors raised at the SDK boundary.
pub mod error;

/// Item decoding.
pub mod read;

/// Wire value model and SDK conversions.
pub mod wire;

/// Item encoding and write expressions.
pub mod write;
