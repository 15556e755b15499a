//! Property-based tests for the sparse kernels.
