pub mod coverage_alert_source;
pub mod digest_log_side_effect;
pub mod in_range_filter;
pub mod period_query_hydrator;
pub mod severity_scorer;
pub mod stockout_risk_hydrator;
pub mod top_k_selector;
