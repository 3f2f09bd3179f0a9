#![allow(clippy::enum_variant_names)]
#![allow(clippy::module_inception)]

pub mod application;
pub mod cli;
pub mod config;
pub mod engine;
pub mod tree;
pub mod view;
