pub mod name_email;
pub mod order_status;
