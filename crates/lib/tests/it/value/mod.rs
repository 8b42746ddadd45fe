//! Value integration tests
