//! Host/device dual-residency buffers.
//!
//! A [`DualBuffer`] owns one logical array that may be materialised in two
//! address spaces: host memory and accelerator (device) memory. Freshness
//! is tracked explicitly and data moves only when a stale side is acquired.
//!
//! # State machine
//!
//! | Current  | Acquire          | Transfer | Next     |
//! |----------|------------------|----------|----------|
//! | `side`   | read/modify(side)| none     | unchanged|
//! | `Host`   | read(Device)     | H→D      | `Both`   |
//! | `Host`   | modify(Device)   | H→D      | `Device` |
//! | `Device` | read(Host)       | D→H      | `Both`   |
//! | `Device` | modify(Host)     | D→H      | `Host`   |
//! | `Both`   | read(any)        | none     | `Both`   |
//! | `Both`   | modify(side)     | none     | `side`   |
//! | any      | overwrite(side)  | none     | `side`   |
//!
//! Reads never change which side is authoritative; they only bring the
//! requested side up to date. Writes make the requested side the sole
//! source of truth.
//!
//! # Device memory
//!
//! The device side is held in a separate allocation that the stencil kernel
//! receives as its argument slices. It is allocated lazily on the first
//! device acquisition, so a buffer that never leaves the host never pays for
//! a second copy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod stats;

pub use buffer::{DualBuffer, Freshness, MemorySide};
pub use stats::TransferStats;
