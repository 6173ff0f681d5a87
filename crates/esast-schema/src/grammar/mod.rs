//! Built-in grammar layers.
//!
//! `es5` is the base grammar; every other module holds the extension layers
//! introduced by one language edition.

pub mod es2015;
pub mod es2016;
pub mod es2017;
pub mod es2018;
pub mod es2019;
pub mod es5;
