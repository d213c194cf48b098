//! Hero Journey: Narrative progression bounded context.
//!
//! Responsible for node pool membership, picking each round's slate of
//! choices under the difficulty curve, the append-only choice history, and
//! the end-of-run chronicle.

pub mod domain;
