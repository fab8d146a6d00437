//! # flatgen Runtime
//!
//! Support library for Rust code generated by flatgen.
//!
//! This crate provides:
//! - Little-endian scalar access ([`Endian`]) and offset types
//! - Zero-copy views over finished buffers ([`Table`], [`Vector`], [`String`])
//! - The [`Struct`] contract for packed fixed-layout structs
//! - A back-to-front [`FlatBufferBuilder`]
//! - Re-exports of `num_traits` and `bytemuck`, used by generated enum
//!   conversions and struct derives

pub mod builder;
pub mod endian;
pub mod error;
pub mod follow;
pub mod string;
pub mod table;
pub mod vector;

pub use builder::FlatBufferBuilder;
pub use endian::{Endian, SOffset, UOffset, VOffset, read_uoffset};
pub use error::{Error, Result};
pub use follow::{Follow, Indirect, Offset, Struct, get_root, struct_at, struct_bytes};
pub use string::String;
pub use table::Table;
pub use vector::{Vector, VectorIter};

pub use bytemuck;
pub use num_traits;
