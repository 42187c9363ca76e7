pub mod contract_domain;
pub mod periodicity;
