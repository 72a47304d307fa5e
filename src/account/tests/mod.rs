//! Account module tests.

mod domain_tests;
mod service_tests;
