//! Test suite for the Compra Pronta API
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
