//! Employee performance analytics served over HTTP: a chart dashboard over
//! the employee dataset and a per-employee score predictor.

pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod employee;
pub mod features;
pub mod predictor;
pub mod simulation;
pub mod state;
pub mod web;
