//! Scene graph: hierarchical world transforms

pub mod transform;
