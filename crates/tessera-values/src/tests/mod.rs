//! Unit tests for `tessera_values`.
