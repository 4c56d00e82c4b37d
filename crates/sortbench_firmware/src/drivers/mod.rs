//! Drivers for the I/O cores on the MMIO bridge.
//!
//! Each driver owns an [`MmioBus`](sortbench_core::bus::MmioBus) for its
//! slot and implements the matching trait from the core crate. The sorting
//! core needs no driver here; the core crate's accelerator driver runs on
//! the bus directly.

pub mod gpio;
pub mod sseg;
pub mod timer;
