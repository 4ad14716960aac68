pub mod constraint;
pub mod constraints;
pub mod decider;
pub mod domain;
pub mod problem;
pub mod stats;
pub mod tracker;
pub mod work_list;
