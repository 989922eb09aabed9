// Backend list APIs
pub mod reference_client_trait;
pub mod http_reference_client;

#[cfg(test)]
pub mod mock_reference_client;
