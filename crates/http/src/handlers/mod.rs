pub mod enrich;
pub mod routes;
