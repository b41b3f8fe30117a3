pub mod errors;
pub mod db;
pub mod account;
pub mod payment;
pub mod payroll_record;
pub mod work_entry;
pub mod visitor_message;
