pub mod cd;
pub mod exit;
pub mod rc;
