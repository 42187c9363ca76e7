pub mod a001_client;
pub mod a002_person;
pub mod a003_contract_template;
pub mod a004_subscription;
pub mod a005_contact;
