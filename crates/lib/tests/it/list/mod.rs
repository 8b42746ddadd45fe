//! PropertyList integration tests
//!
//! Tests are organized by operation group: basic reads and writes, merging
//! (copy and combine), formatter access, and serialization.

mod basic_tests;
mod serialization_tests;
mod visitor_tests;
