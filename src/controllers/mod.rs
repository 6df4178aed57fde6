pub mod fuel_entry_controller;
pub mod vehicle_controller;
