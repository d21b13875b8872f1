//! Unit tests for the coordinate module
