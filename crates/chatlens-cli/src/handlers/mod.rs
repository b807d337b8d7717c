pub mod agent;
pub mod analyze;
pub mod init;
pub mod session_export;
pub mod session_list;
pub mod session_show;
pub mod session_stats;
