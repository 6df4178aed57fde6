//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores, extracción de cuerpos JSON y validación.

pub mod errors;
pub mod extract;
pub mod validation;
