//! # pwm-relay-firmware
//!
//! Firmware for the two channel PWM relay on an STM32F103 board.
//! The `transmitter` and `receiver` binaries wire the `pwm_relay` handlers to interrupts.

#![no_std]

#![deny(missing_docs)]

/// Constants and hardware glue for the relay board
pub mod board;
