pub mod reference_refresh;
