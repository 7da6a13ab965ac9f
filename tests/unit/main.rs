//! Unit tests for prompt composition and output parsing
