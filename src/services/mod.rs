pub mod analytics_service;
pub mod applicant_service;
pub mod draft_service;
pub mod export_service;
pub mod hr_api_service;
pub mod resume_service;
pub mod scheduling_service;
pub mod session_service;
