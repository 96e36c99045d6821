pub mod candidate;
pub mod company;
pub mod experience;
pub mod job;
pub mod skill;
