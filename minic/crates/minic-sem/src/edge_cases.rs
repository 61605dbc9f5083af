//! The operator/operand rejection matrix.
//!
//! Exercises every illegal operand pairing per operator family through
//! `print(...)`, which accepts any result type, so the only possible error
//! is the operator check itself.
