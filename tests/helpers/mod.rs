//! Test helpers module
//!
//! Mock backend server, test data builders and test environment setup shared
//! by the integration tests.

#![allow(dead_code)]

pub mod backend_mock;
pub mod simple_test;
pub mod test_data;

pub use backend_mock::*;
pub use simple_test::*;
pub use test_data::*;
