//! Cross-module property tests for the collision pipeline
