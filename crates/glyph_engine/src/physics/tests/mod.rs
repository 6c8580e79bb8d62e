//! End-to-end collision scenarios
