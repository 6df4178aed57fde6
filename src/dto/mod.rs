pub mod api_response;
pub mod fuel_entry_dto;
pub mod vehicle_dto;
