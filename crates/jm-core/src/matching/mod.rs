pub mod education;
pub mod experience;
pub mod location;
pub mod pipeline;
pub mod scoring;
pub mod sequence;
pub mod skills;
pub mod weights;
