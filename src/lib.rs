//! Fuel Tracker
//! 
//! Servicio de vehículos y cargas de combustible: valida que el odómetro
//! nunca retroceda en el tiempo y calcula estadísticas de consumo.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
