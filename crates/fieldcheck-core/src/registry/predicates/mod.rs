//! Pure check functions behind the registry
//!
//! Each predicate takes a candidate value plus typed arguments and returns a
//! boolean verdict. Predicates never panic on unexpected input; a value of
//! the wrong shape simply fails the check.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod general;
pub mod number;
pub mod string;
