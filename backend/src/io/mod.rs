//! # IO Module
//!
//! Interface layer exposing the domain to clients.

pub mod rest;
