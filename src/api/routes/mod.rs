pub mod reference_routes;
