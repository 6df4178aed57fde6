//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de dominio que guardan los repositorios
//! en memoria.

pub mod fuel_entry;
pub mod vehicle;
