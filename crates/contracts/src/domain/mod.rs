pub mod log_record;
