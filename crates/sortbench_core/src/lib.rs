//! Core logic of the software versus hardware sort benchmark.
//!
//! This crate drives the sorting accelerator through its register interface,
//! times both sort paths, verifies their results and runs the interactive
//! state machine that ties buttons, switches and the display together. It is
//! `no_std` and allocation-free so the same code runs in firmware and in
//! host-side simulation.

#![no_std]

use core::fmt;

/// Driver for the sorting accelerator's register protocol.
///
/// Wraps a register bus with the accelerator's register map and exposes the
/// configure / load / sort / drain / idle operations as individual calls.
pub mod accelerator;

/// Timing and comparison of the software and hardware sort paths.
pub mod bench;

/// Register bus abstraction and the volatile MMIO implementation.
///
/// Drivers are written against this trait so that they can talk to real
/// peripherals on the target or to a behavioral model on the host.
pub mod bus;

/// Array size and element width derived from the size switches.
pub mod config;

/// Interactive state machine of the benchmark controller.
///
/// Owns the two data arrays and the benchmark, consumes button presses and
/// switch levels, and produces a display frame every iteration.
pub mod controller;

/// Display frames and the display sink trait.
pub mod display;

/// Rising-edge button events, switch decoding and the input source trait.
pub mod input;

/// LFSR and descending test patterns.
pub mod pattern;

/// In-place software sort used as the baseline.
pub mod sort;

/// Stack-allocated vector with compile-time fixed capacity.
pub mod static_vec;

/// Spinlock shared by the firmware console and its fault handlers.
pub mod sync;

/// Cycle counter trait used to time both sort paths.
pub mod timing;

/// Errors returned by benchmark operations.
///
/// Register transactions themselves never fail. These variants cover
/// misuse of the benchmark API and the optional bounded wait on the
/// accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchError {
    /// The accelerator did not report completion within the poll budget.
    ///
    /// Only produced when the driver is configured with a bounded budget.
    /// With the default unbounded budget a unit that never completes hangs
    /// the caller instead.
    AcceleratorTimeout {
        /// Status reads issued before giving up.
        polls: u32,
    },

    /// A hardware sort was requested for zero elements or for more elements
    /// than the accelerator memory holds.
    SizeOutOfRange {
        /// Requested element count.
        n: usize,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::AcceleratorTimeout { polls } => {
                write!(f, "accelerator did not finish after {} status polls", polls)
            }
            BenchError::SizeOutOfRange { n } => {
                write!(f, "element count {} is outside the accelerator capacity", n)
            }
        }
    }
}
