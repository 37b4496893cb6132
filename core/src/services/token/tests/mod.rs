//! Unit tests for the token service

mod es256_tests;
