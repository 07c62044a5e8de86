//! Gamification engine: action rules, leveling, badges, challenges

pub mod badges;
pub mod challenges;
pub mod levels;
pub mod pipeline;
pub mod rules;
pub mod streaks;

pub use pipeline::{ActionOutcome, ActionPipeline};

mod levels_test;
mod rules_test;
mod streaks_test;
