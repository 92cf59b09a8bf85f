//! Binary snapshot format of a [`Namespace`](crate::Namespace).
//!
//! ```text
//! DirectoryIndex := dirCount:u16 { DirEntry }*dirCount
//! DirEntry       := key:u16 nameLen:u16 name:u8[nameLen] FileIndex
//! FileIndex      := fileCount:u16 { FileEntry }*fileCount
//! FileEntry      := key:u16 nameLen:u16 name:u8[nameLen] revCount:u8 { Revision }*revCount
//! ```
//!
//! Integers are little-endian, names carry no terminator and revisions are copied
//! verbatim, [`Revision::SIZE`](crate::Revision::SIZE) bytes each, oldest first.
//! Records are emitted in ascending key order on both levels, and an empty namespace
//! is a lone `dirCount` of zero.
//!
//! Both directions only move forward through the stream, so any [`Read`](std::io::Read)
//! or [`Write`](std::io::Write) works, not just seekable files.

mod decode;
mod encode;

pub use decode::{load, DecodeError};
pub use encode::{dump, EncodeError};
