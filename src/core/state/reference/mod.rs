pub mod reference_item;
pub mod reference_state;
pub mod reference_state_manager;
pub mod reference_state_repository;
pub mod reference_state_repository_trait;
