//! # pwm-relay
//!
//! Interrupt driven core of a two channel PWM relay. A transmitter samples two analog
//! positions through one shared ADC, a receiver times two incoming pulse trains with
//! capture units. Both re-emit the values as hardware PWM from a fixed period tick.
//!
//! Every handler in here is short and non-blocking and is meant to be called straight
//! from an interrupt. Nothing locks: each piece of shared state has exactly one writer,
//! see [`processor`] and [`priority`].

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

/// Compile time constants for the relay
pub mod config;

mod channel;
pub use channel::*;

mod error;
pub use error::*;

mod duty;
pub use duty::*;

/// Traits describing the hardware the handlers drive
pub mod hw;

pub mod processor;

mod liveness;
pub use liveness::*;

/// The periodic output stage
pub mod output;

mod converter;
pub use converter::*;

/// Transmitter capture path (edge trigger + shared ADC)
pub mod transmitter;

/// Receiver capture path (edge timing)
pub mod receiver;

pub mod priority;

/// Hardware doubles for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use hw::{AnalogConverter, CaptureUnits, ClearInterrupt, DutyOutputs, Edge};
pub use output::{Frame, OutputStage};
pub use processor::{Processor, SignalProcessor};
pub use receiver::{CaptureState, ChannelCapture, Receiver};
pub use transmitter::Transmitter;
