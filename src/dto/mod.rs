pub mod company_dto;
pub mod job_dto;
pub mod response;
pub mod skill_dto;
