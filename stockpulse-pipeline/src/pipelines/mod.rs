pub mod alert_digest;
