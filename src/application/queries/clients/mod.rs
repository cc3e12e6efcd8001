mod service;

pub use service::ClientQueryService;
