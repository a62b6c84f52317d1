//! Servo calibration file tool.
//!
//! Library half of the `cupcake_calibrate` binary: subcommand logic in
//! [`commands`], rendering in [`report`].

pub mod commands;
pub mod report;
