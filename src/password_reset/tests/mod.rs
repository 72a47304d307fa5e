//! Password-reset module tests.
