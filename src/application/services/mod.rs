pub mod embed_service;

pub mod report_service;
