//! Output stage drivers

pub mod pwm_stage;

pub use pwm_stage::PwmOutputStage;
