//! Laminate Stock - multi-site laminate inventory dashboard backend
//!
//! This crate keeps per-site, per-month stock observations in one shared
//! table and computes cross-site totals, derived pallet/area quantities and
//! monthly trends over it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
