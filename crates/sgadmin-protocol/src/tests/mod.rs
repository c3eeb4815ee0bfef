//! Unit tests for the response reader.
