pub mod contact_submission;
pub mod payment_setting;
pub mod transaction;
