//! OTP module tests.

mod service_tests;
