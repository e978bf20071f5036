//! Game lifecycle: the controller and the outcomes it reports.

pub mod controller;
pub mod outcome;

pub use controller::{GameController, Phase};
pub use outcome::{FlipOutcome, GameOver, ResetToken};
